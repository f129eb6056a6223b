use crate::errors::{MissingMethod, TypeError};
use failure::Fail;
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};
use strtab::Symbol;
use strum_macros::{EnumIter, EnumString};

#[derive(Debug, Fail)]
#[fail(display = "class '{}' is already declared", name)]
pub struct ClassAlreadyDeclared {
    pub name: String,
}

#[derive(Debug, Fail)]
#[fail(display = "method '{}' is already declared in class '{}'", method, class)]
pub struct MethodAlreadyDeclared {
    pub class: String,
    pub method: String,
}

/// All classes and interfaces of a program, keyed by name.
///
/// The supertype graph formed by the registered classes must be acyclic.
/// This is not checked: a cycle makes subtype queries and method resolution
/// recurse forever.
#[derive(Debug, Default)]
pub struct TypeSystem<'src> {
    defined_classes: HashMap<Symbol<'src>, ClassDef<'src>>,
}

impl<'src> TypeSystem<'src> {
    pub fn add_class_def(
        &mut self,
        class_def: ClassDef<'src>,
    ) -> Result<ClassDefId<'src>, ClassAlreadyDeclared> {
        match self.defined_classes.entry(class_def.name) {
            Entry::Occupied(_) => Err(ClassAlreadyDeclared {
                name: class_def.name.to_string(),
            }),
            Entry::Vacant(e) => {
                log::debug!("declared {} {}", class_def.kind, class_def.name);
                let id = ClassDefId { id: class_def.name };
                e.insert(class_def);
                Ok(id)
            }
        }
    }

    pub fn class_mut(&mut self, id: ClassDefId<'src>) -> &mut ClassDef<'src> {
        self.defined_classes
            .get_mut(&id.id)
            .expect("Ids always point to existing classes")
    }

    pub fn class(&self, id: ClassDefId<'src>) -> &ClassDef<'src> {
        self.defined_classes
            .get(&id.id)
            .expect("Ids always point to existing classes")
    }

    pub fn lookup_class(&self, name: Symbol<'src>) -> Option<(&ClassDef<'src>, ClassDefId<'src>)> {
        self.defined_classes
            .get(&name)
            .map(|class| (class, ClassDefId { id: name }))
    }

    /// Resolves a type name as written in a program: a primitive keyword,
    /// `null`, or the name of a registered class.
    pub fn type_named(&self, name: Symbol<'src>) -> Option<CheckedType<'src>> {
        if let Ok(primitive) = name.as_str().parse::<PrimitiveType>() {
            return Some(CheckedType::Primitive(primitive));
        }
        if name == *"null" {
            return Some(CheckedType::Null);
        }
        self.lookup_class(name)
            .map(|(_, id)| CheckedType::TypeRef(id))
    }

    pub fn defined_classes(&self) -> impl Iterator<Item = &ClassDef<'src>> {
        self.defined_classes.values()
    }
}

/// A `ClassDefId` refers to a class definition.
///
/// Having an instance of this struct ensures that
/// the type system that issued this instance can
/// provide the definition of that class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassDefId<'src> {
    id: Symbol<'src>,
}

impl<'src> From<ClassDefId<'src>> for CheckedType<'src> {
    fn from(id: ClassDefId<'src>) -> CheckedType<'src> {
        CheckedType::TypeRef(id)
    }
}

impl<'src> fmt::Display for ClassDefId<'src> {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<'src> ClassDefId<'src> {
    pub fn as_str(&self) -> &str {
        self.id.as_str()
    }

    pub fn id(&self) -> Symbol<'src> {
        self.id
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    #[display(fmt = "class")]
    Class,
    #[display(fmt = "abstract class")]
    AbstractClass,
    #[display(fmt = "interface")]
    Interface,
}

#[derive(Debug)]
pub struct ClassDef<'src> {
    pub name: Symbol<'src>,
    pub kind: ClassKind,
    /// Direct supertypes in declaration order (superclass first, then
    /// interfaces). The order decides method resolution.
    supertypes: Vec<ClassDefId<'src>>,
    constructor: ConstructorDef<'src>,
    methods: HashMap<Symbol<'src>, ClassMethodDef<'src>>,
}

impl<'src> ClassDef<'src> {
    pub fn new(name: Symbol<'src>, kind: ClassKind) -> ClassDef<'src> {
        ClassDef {
            name,
            kind,
            supertypes: Vec::new(),
            constructor: ConstructorDef::default(),
            methods: HashMap::new(),
        }
    }

    pub fn id(&self) -> ClassDefId<'src> {
        ClassDefId { id: self.name }
    }

    pub fn ty(&self) -> CheckedType<'src> {
        CheckedType::TypeRef(self.id())
    }

    pub fn add_supertype(&mut self, supertype: ClassDefId<'src>) {
        self.supertypes.push(supertype);
    }

    pub fn supertypes(&self) -> &[ClassDefId<'src>] {
        &self.supertypes
    }

    pub fn set_constructor(&mut self, constructor: ConstructorDef<'src>) {
        self.constructor = constructor;
    }

    pub fn constructor(&self) -> &ConstructorDef<'src> {
        &self.constructor
    }

    pub fn add_method(&mut self, method: ClassMethodDef<'src>) -> Result<(), MethodAlreadyDeclared> {
        match self.methods.entry(method.name) {
            Entry::Occupied(_) => {
                return Err(MethodAlreadyDeclared {
                    class: self.name.to_string(),
                    method: method.name.to_string(),
                })
            }
            Entry::Vacant(e) => e.insert(method),
        };
        Ok(())
    }

    /// A method declared by this class itself, ignoring supertypes.
    pub fn method(&self, name: Symbol<'src>) -> Option<&ClassMethodDef<'src>> {
        self.methods.get(&name)
    }

    /// True if `other` is this class or one of its (transitive) supertypes.
    pub fn is_subclass_of(&self, other: ClassDefId<'src>, ts: &TypeSystem<'src>) -> bool {
        self.id() == other
            || self
                .supertypes
                .iter()
                .any(|&supertype| ts.class(supertype).is_subclass_of(other, ts))
    }

    /// Looks up a method by name. Methods declared on this class win over
    /// inherited ones; supertypes are searched depth-first in declaration
    /// order and the first match is returned.
    pub fn resolve_method<'ts>(
        &'ts self,
        name: Symbol<'src>,
        ts: &'ts TypeSystem<'src>,
    ) -> Option<&'ts ClassMethodDef<'src>> {
        self.methods.get(&name).or_else(|| {
            self.supertypes
                .iter()
                .find_map(|&supertype| ts.class(supertype).resolve_method(name, ts))
        })
    }

    /// Like `resolve_method`, but fails with a no-such-method error that
    /// suggests the closest visible method name.
    pub fn method_named<'ts>(
        &'ts self,
        name: Symbol<'src>,
        ts: &'ts TypeSystem<'src>,
    ) -> Result<&'ts ClassMethodDef<'src>, TypeError> {
        self.resolve_method(name, ts).ok_or_else(|| {
            let mut visible = Vec::new();
            self.collect_method_names(ts, &mut visible);
            visible.sort_by_key(|name| name.as_str());
            visible.dedup();

            TypeError::NoSuchMethod(MissingMethod::NotFound {
                ty: self.name.to_string(),
                method: name.to_string(),
                suggestion: strtab::most_related(&name, &visible).map(|s| s.to_string()),
            })
        })
    }

    fn collect_method_names(&self, ts: &TypeSystem<'src>, names: &mut Vec<Symbol<'src>>) {
        names.extend(self.methods.keys().cloned());
        for &supertype in &self.supertypes {
            ts.class(supertype).collect_method_names(ts, names);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethodDef<'src> {
    pub name: Symbol<'src>,
    pub params: Vec<CheckedType<'src>>,
    pub return_ty: CheckedType<'src>,
}

impl<'src> ClassMethodDef<'src> {
    pub fn new(
        name: Symbol<'src>,
        params: Vec<CheckedType<'src>>,
        return_ty: CheckedType<'src>,
    ) -> ClassMethodDef<'src> {
        ClassMethodDef {
            name,
            params,
            return_ty,
        }
    }
}

/// The single constructor of a class. The constructed type is the owning
/// class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorDef<'src> {
    pub params: Vec<CheckedType<'src>>,
}

impl<'src> ConstructorDef<'src> {
    pub fn new(params: Vec<CheckedType<'src>>) -> ConstructorDef<'src> {
        ConstructorDef { params }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
pub enum PrimitiveType {
    #[strum(serialize = "void")]
    Void,
    #[strum(serialize = "boolean")]
    Boolean,
    #[strum(serialize = "byte")]
    Byte,
    #[strum(serialize = "short")]
    Short,
    #[strum(serialize = "char")]
    Char,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "long")]
    Long,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "double")]
    Double,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        use self::PrimitiveType::*;
        match self {
            Void => "void",
            Boolean => "boolean",
            Byte => "byte",
            Short => "short",
            Char => "char",
            Int => "int",
            Long => "long",
            Float => "float",
            Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// The static type of an expression.
///
/// Every type is exactly one of primitive, null or object (`TypeRef`);
/// `Unknown` only appears as the static type of a method invocation that
/// cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckedType<'src> {
    Primitive(PrimitiveType),
    Null,
    TypeRef(ClassDefId<'src>),
    Unknown(Symbol<'src>),
}

impl<'src> CheckedType<'src> {
    pub fn is_object_type(&self) -> bool {
        match self {
            CheckedType::TypeRef(_) => true,
            CheckedType::Primitive(_) | CheckedType::Null | CheckedType::Unknown(_) => false,
        }
    }

    /// Nominal subtype relation. Reflexive and transitive; `null` is a
    /// subtype of every object type but of no primitive type.
    pub fn is_subtype_of(&self, other: &CheckedType<'src>, ts: &TypeSystem<'src>) -> bool {
        use self::CheckedType::*;

        match (self, other) {
            // unknown types stem from an earlier error, don't report them again
            (Unknown(_), _) | (_, Unknown(_)) => true,
            (Null, Null) | (Null, TypeRef(_)) => true,
            (Primitive(ty), Primitive(other_ty)) => ty == other_ty,
            (TypeRef(class_id), TypeRef(other_id)) => {
                ts.class(*class_id).is_subclass_of(*other_id, ts)
            }
            _ => false,
        }
    }

    pub fn is_supertype_of(&self, other: &CheckedType<'src>, ts: &TypeSystem<'src>) -> bool {
        other.is_subtype_of(self, ts)
    }
}

impl<'src> fmt::Display for CheckedType<'src> {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        use self::CheckedType::*;
        match self {
            Primitive(ty) => write!(f, "{}", ty),
            Null => write!(f, "null"),
            TypeRef(name) => write!(f, "{}", name),
            Unknown(name) => write!(f, "?{}", name),
        }
    }
}
