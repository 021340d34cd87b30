//! Built-in type handlers.
//!
//! Conversions target the CPython argument protocol: forward wrappers fill
//! native temporaries through `PyArg_ParseTupleAndKeywords` atoms and build
//! results with `Py_BuildValue`; reverse wrappers do the opposite.
//!
//! | Family | Types | Role | Directions |
//! |--------|-------|------|------------|
//! | [`ScalarParam`] | `int`, `double`, `uint64_t`, ... | parameter | in |
//! | [`ScalarPtrParam`] | `int *`, `double &`, ... | parameter | in, out, inout |
//! | [`BoolParam`] | `bool` | parameter | in |
//! | [`CStringParam`] | `char *`, `const char *` | parameter | in |
//! | [`StdStringParam`] | `std::string`, `const std::string &` | parameter | in |
//! | [`ScalarReturn`], [`BoolReturn`], [`CStringReturn`], [`StdStringReturn`], [`VoidReturn`] | as above | return value | out |

mod boolean;
mod scalar;
mod string;
mod void;

pub use boolean::{BoolParam, BoolReturn};
pub use scalar::{ScalarParam, ScalarPtrParam, ScalarReturn};
pub use string::{CStringParam, CStringReturn, StdStringParam, StdStringReturn};
pub use void::VoidReturn;

use tracing::debug;
use typebind_core::{Directions, Role};
use typebind_registry::TypeRegistryBuilder;

/// A native scalar type family and the format atom that converts it.
#[derive(Debug, Clone, Copy)]
pub struct ScalarType {
    pub ctypes: &'static [&'static str],
    pub atom: &'static str,
    /// Whether `T *` and `T &` are handled as out parameters.
    /// `char *` is a C string, not a pointer to one character.
    pub by_pointer: bool,
}

const fn scalar(ctypes: &'static [&'static str], atom: &'static str) -> ScalarType {
    ScalarType {
        ctypes,
        atom,
        by_pointer: true,
    }
}

pub const SCALAR_TYPES: &[ScalarType] = &[
    scalar(&["int", "int32_t"], "i"),
    scalar(&["unsigned", "uint32_t"], "I"),
    scalar(&["long", "int64_t"], "L"),
    scalar(&["uint64_t"], "K"),
    scalar(&["short", "int16_t"], "h"),
    scalar(&["uint16_t"], "H"),
    scalar(&["int8_t"], "b"),
    scalar(&["uint8_t"], "B"),
    scalar(&["double"], "d"),
    scalar(&["float"], "f"),
    ScalarType {
        ctypes: &["char"],
        atom: "c",
        by_pointer: false,
    },
];

const C_STRINGS: &[&str] = &["char *", "const char *"];

/// Register every built-in handler.
pub fn register_builtins(builder: &mut TypeRegistryBuilder) {
    let before = builder.catalog().len();

    for family in SCALAR_TYPES {
        let (ctypes, atom) = (family.ctypes, family.atom);
        builder
            .register_handler(
                ctypes,
                Directions::IN,
                Role::Parameter,
                ScalarParam::new(atom),
            )
            .register_handler(
                ctypes,
                Directions::OUT,
                Role::ReturnValue,
                ScalarReturn::new(atom),
            );
        if !family.by_pointer {
            continue;
        }

        let pointers: Vec<String> = ctypes
            .iter()
            .flat_map(|ctype| [format!("{ctype} *"), format!("{ctype} &")])
            .collect();
        let pointers: Vec<&str> = pointers.iter().map(String::as_str).collect();
        builder.register_handler(
            &pointers,
            Directions::all(),
            Role::Parameter,
            ScalarPtrParam::new(atom),
        );
    }

    builder
        .register_handler(&["bool"], Directions::IN, Role::Parameter, BoolParam)
        .register_handler(&["bool"], Directions::OUT, Role::ReturnValue, BoolReturn)
        .register_handler(C_STRINGS, Directions::IN, Role::Parameter, CStringParam)
        .register_handler(C_STRINGS, Directions::OUT, Role::ReturnValue, CStringReturn)
        .register_handler(
            &["std::string", "const std::string &"],
            Directions::IN,
            Role::Parameter,
            StdStringParam,
        )
        .register_handler(
            &["std::string"],
            Directions::OUT,
            Role::ReturnValue,
            StdStringReturn,
        )
        .register_handler(&["void"], Directions::OUT, Role::ReturnValue, VoidReturn);

    debug!(
        handlers = builder.catalog().len() - before,
        "registered built-in handlers"
    );
}
