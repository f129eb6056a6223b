//! A small graphics class hierarchy shared by the unit tests.
//!
//! ```text
//! Object
//! ├── Color(int, int, int)
//! ├── Paintable (interface)
//! │   ├── Fillable (interface)     fill(Color), outline(): Color
//! │   └── Strokable (interface)    outline(): double
//! └── Graphics (abstract)          setPosition(double, double), scale(double), ...
//!     ├── Rectangle(double, double)    scale(double, double): Rectangle
//!     ├── GraphicsGroup()              add(Graphics, int), getChild(int)
//!     └── Circle(double)               also implements Fillable, Strokable
//! ```

use crate::{ast::Expr, builtin_types::BuiltinTypes, type_system::*};
use strtab::{StringTable, Symbol};

pub struct GraphicsFixture {
    pub strtab: StringTable<'static>,
    pub ts: TypeSystem<'static>,
    pub builtins: BuiltinTypes<'static>,
    pub paintable: CheckedType<'static>,
    pub fillable: CheckedType<'static>,
    pub strokable: CheckedType<'static>,
    pub graphics: CheckedType<'static>,
    pub rectangle: CheckedType<'static>,
    pub graphics_group: CheckedType<'static>,
    pub circle: CheckedType<'static>,
    pub color: CheckedType<'static>,
}

impl GraphicsFixture {
    pub fn sym(&mut self, name: &'static str) -> Symbol<'static> {
        self.strtab.intern(name)
    }

    pub fn class(&self, ty: CheckedType<'static>) -> &ClassDef<'static> {
        match ty {
            CheckedType::TypeRef(id) => self.ts.class(id),
            _ => panic!("{} is not a class", ty),
        }
    }

    pub fn class_mut(&mut self, ty: CheckedType<'static>) -> &mut ClassDef<'static> {
        match ty {
            CheckedType::TypeRef(id) => self.ts.class_mut(id),
            _ => panic!("{} is not a class", ty),
        }
    }

    pub fn var(&mut self, name: &'static str, ty: CheckedType<'static>) -> Expr<'static> {
        Expr::var(self.sym(name), ty)
    }

    pub fn call(
        &mut self,
        receiver: Expr<'static>,
        name: &'static str,
        args: Vec<Expr<'static>>,
    ) -> Expr<'static> {
        Expr::method_invocation(receiver, self.sym(name), args)
    }

    pub fn int_literal(&self) -> Expr<'static> {
        Expr::literal("0", self.builtins.int())
    }

    pub fn double_literal(&self) -> Expr<'static> {
        Expr::literal("0.0", self.builtins.double())
    }

    pub fn all_types(&self) -> Vec<CheckedType<'static>> {
        vec![
            self.builtins.object(),
            self.builtins.string(),
            self.paintable,
            self.fillable,
            self.strokable,
            self.graphics,
            self.rectangle,
            self.graphics_group,
            self.circle,
            self.color,
            CheckedType::Null,
            self.builtins.int(),
            self.builtins.double(),
            self.builtins.boolean(),
            self.builtins.void(),
        ]
    }
}

fn declare(
    ts: &mut TypeSystem<'static>,
    strtab: &mut StringTable<'static>,
    name: &'static str,
    kind: ClassKind,
    supertypes: &[ClassDefId<'static>],
) -> ClassDefId<'static> {
    let mut class_def = ClassDef::new(strtab.intern(name), kind);
    for &supertype in supertypes {
        class_def.add_supertype(supertype);
    }
    ts.add_class_def(class_def).unwrap()
}

pub fn graphics() -> GraphicsFixture {
    use self::ClassKind::*;

    let mut strtab = StringTable::new();
    let mut ts = TypeSystem::default();
    let builtins = BuiltinTypes::add_to(&mut ts, &mut strtab).unwrap();
    let object = builtins.object_id();

    let color = declare(&mut ts, &mut strtab, "Color", Class, &[object]);
    let paintable = declare(&mut ts, &mut strtab, "Paintable", Interface, &[object]);
    let fillable = declare(&mut ts, &mut strtab, "Fillable", Interface, &[paintable]);
    let strokable = declare(&mut ts, &mut strtab, "Strokable", Interface, &[paintable]);
    let graphics = declare(&mut ts, &mut strtab, "Graphics", AbstractClass, &[object]);
    let rectangle = declare(&mut ts, &mut strtab, "Rectangle", Class, &[graphics]);
    let graphics_group = declare(&mut ts, &mut strtab, "GraphicsGroup", Class, &[graphics]);
    let circle = declare(
        &mut ts,
        &mut strtab,
        "Circle",
        Class,
        &[graphics, fillable, strokable],
    );

    let int = builtins.int();
    let double = builtins.double();
    let void = builtins.void();

    let methods = vec![
        (color, "getRed", vec![], int),
        (color, "mixedWith", vec![color.into()], color.into()),
        (paintable, "paint", vec![graphics.into()], void),
        (fillable, "fill", vec![color.into()], void),
        (fillable, "outline", vec![], color.into()),
        (strokable, "outline", vec![], double),
        (strokable, "setStrokeWidth", vec![double], void),
        (graphics, "setPosition", vec![double, double], void),
        (graphics, "getColor", vec![], color.into()),
        (graphics, "scale", vec![double], void),
        (graphics, "describe", vec![], builtins.string()),
        (rectangle, "scale", vec![double, double], rectangle.into()),
        (rectangle, "getWidth", vec![], double),
        (graphics_group, "add", vec![graphics.into(), int], void),
        (graphics_group, "getChild", vec![int], graphics.into()),
        (circle, "getRadius", vec![], double),
    ];
    for (class_id, name, params, return_ty) in methods {
        let method = ClassMethodDef::new(strtab.intern(name), params, return_ty);
        ts.class_mut(class_id).add_method(method).unwrap();
    }

    let constructors = vec![
        (color, vec![int, int, int]),
        (rectangle, vec![double, double]),
        (circle, vec![double]),
    ];
    for (class_id, params) in constructors {
        ts.class_mut(class_id)
            .set_constructor(ConstructorDef::new(params));
    }

    GraphicsFixture {
        strtab,
        ts,
        builtins,
        paintable: paintable.into(),
        fillable: fillable.into(),
        strokable: strokable.into(),
        graphics: graphics.into(),
        rectangle: rectangle.into(),
        graphics_group: graphics_group.into(),
        circle: circle.into(),
        color: color.into(),
    }
}
