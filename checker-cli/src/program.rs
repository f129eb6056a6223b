//! The JSON program description read by `jtc`.
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "Shape", "kind": "interface",
//!       "methods": [ { "name": "area", "returns": "double" } ] },
//!     { "name": "Square", "supertypes": ["Object", "Shape"],
//!       "constructor": ["double"],
//!       "methods": [ { "name": "area", "returns": "double" } ] }
//!   ],
//!   "expressions": [
//!     { "assign": { "lhs": { "var": ["s", "Shape"] },
//!                   "rhs": { "new": ["Square", [ { "literal": ["2.0", "double"] } ]] } } }
//!   ]
//! }
//! ```
//!
//! Every string in here is borrowed by the interned names of a loaded
//! program, so a description has to outlive everything built from it.

use serde_derive::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProgramDesc {
    #[serde(default)]
    pub types: Vec<TypeDesc>,
    #[serde(default)]
    pub expressions: Vec<ExprDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDesc {
    pub name: String,
    #[serde(default)]
    pub kind: KindDesc,
    /// Superclass first, then interfaces. Defaults to `Object`.
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Parameter types of the constructor.
    #[serde(default)]
    pub constructor: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodDesc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindDesc {
    Class,
    Abstract,
    Interface,
}

impl Default for KindDesc {
    fn default() -> Self {
        KindDesc::Class
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDesc {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default = "void")]
    pub returns: String,
}

fn void() -> String {
    "void".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExprDesc {
    /// `[name, type]`
    Var(String, String),
    /// `[value, type]`
    Literal(String, String),
    Null,
    Assign {
        lhs: Box<ExprDesc>,
        rhs: Box<ExprDesc>,
    },
    Call {
        receiver: Box<ExprDesc>,
        method: String,
        #[serde(default)]
        args: Vec<ExprDesc>,
    },
    /// `[type, [args]]`
    New(String, Vec<ExprDesc>),
}

impl ProgramDesc {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
