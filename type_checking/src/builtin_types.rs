use crate::type_system::*;
use failure::Error;
use strtab::StringTable;

/// The types every program can use without declaring them: the root class
/// `Object`, `String`, the null type and the primitives.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypes<'src> {
    object: ClassDefId<'src>,
    string: ClassDefId<'src>,
}

impl<'src> BuiltinTypes<'src> {
    /// Registers `Object` and `String` in the type system.
    ///
    /// Fails if a class named `Object` or `String` was already declared.
    pub fn add_to(
        type_system: &mut TypeSystem<'src>,
        strtab: &mut StringTable<'src>,
    ) -> Result<BuiltinTypes<'src>, Error> {
        let boolean = CheckedType::Primitive(PrimitiveType::Boolean);
        let int = CheckedType::Primitive(PrimitiveType::Int);
        let char_ty = CheckedType::Primitive(PrimitiveType::Char);

        let object =
            type_system.add_class_def(ClassDef::new(strtab.intern("Object"), ClassKind::Class))?;

        let string = {
            let mut string_class_def = ClassDef::new(strtab.intern("String"), ClassKind::Class);
            string_class_def.add_supertype(object);
            type_system.add_class_def(string_class_def)?
        };

        let builtin_methods = vec![
            (
                object,
                ClassMethodDef::new(strtab.intern("equals"), vec![object.into()], boolean),
            ),
            (
                object,
                ClassMethodDef::new(strtab.intern("hashCode"), vec![], int),
            ),
            (
                object,
                ClassMethodDef::new(strtab.intern("toString"), vec![], string.into()),
            ),
            (
                string,
                ClassMethodDef::new(strtab.intern("length"), vec![], int),
            ),
            (
                string,
                ClassMethodDef::new(strtab.intern("charAt"), vec![int], char_ty),
            ),
            (
                string,
                ClassMethodDef::new(
                    strtab.intern("concat"),
                    vec![string.into()],
                    string.into(),
                ),
            ),
        ];

        for (class_id, method) in builtin_methods {
            type_system.class_mut(class_id).add_method(method)?;
        }

        Ok(BuiltinTypes { object, string })
    }

    pub fn object_id(&self) -> ClassDefId<'src> {
        self.object
    }

    pub fn object(&self) -> CheckedType<'src> {
        self.object.into()
    }

    pub fn string_id(&self) -> ClassDefId<'src> {
        self.string
    }

    pub fn string(&self) -> CheckedType<'src> {
        self.string.into()
    }

    pub fn null(&self) -> CheckedType<'src> {
        CheckedType::Null
    }

    pub fn primitive(&self, primitive: PrimitiveType) -> CheckedType<'src> {
        CheckedType::Primitive(primitive)
    }

    pub fn void(&self) -> CheckedType<'src> {
        self.primitive(PrimitiveType::Void)
    }

    pub fn boolean(&self) -> CheckedType<'src> {
        self.primitive(PrimitiveType::Boolean)
    }

    pub fn int(&self) -> CheckedType<'src> {
        self.primitive(PrimitiveType::Int)
    }

    pub fn double(&self) -> CheckedType<'src> {
        self.primitive(PrimitiveType::Double)
    }
}
