//! Integration tests for the per-kind descriptor contract: slot names,
//! argument shapes, annotations, policy-gated capabilities and the shared
//! wire plan behind serialize, deserialize and size.

use wirebuf_gen::{
    bundle, bundle_all, Annotation, DispatchArm, GenError, MethodBody, MethodDescriptor, Template,
    TypeFormatter, ValueKind, WireOp,
};
use wirebuf_schema::{
    AliasDef, EnumDef, FieldKind, ScalarKind, SchemaRegistry, SequenceDef, StructDef, K,
};

fn registry() -> SchemaRegistry {
    let mut reg = SchemaRegistry::new();
    reg.define(
        StructDef::new("Point")
            .field("x", K.U16())
            .field("y", K.U16())
            .sortable(),
    )
    .unwrap();
    reg.define(
        StructDef::new("Header")
            .const_field("magic", K.U32(), 0x4655_4257)
            .field("version", K.U16())
            .field("flags", K.U8()),
    )
    .unwrap();
    reg.define(
        StructDef::new("Ghost")
            .field("id", K.U64())
            .not_comparable()
            .not_printable(),
    )
    .unwrap();
    reg.define(
        StructDef::new("Shape")
            .tagged(ScalarKind::U8)
            .field("layer", K.U8()),
    )
    .unwrap();
    reg.define(
        StructDef::new("Circle")
            .extends("Shape", 1)
            .field("radius", K.U32()),
    )
    .unwrap();
    reg.define(
        StructDef::new("Square")
            .extends("Shape", 2)
            .field("side", K.U32()),
    )
    .unwrap();
    reg.define(
        EnumDef::new("Color", ScalarKind::U8)
            .variant("Red", 0)
            .variant("Green", 1)
            .variant("Blue", 2),
    )
    .unwrap();
    reg.define(
        EnumDef::new("Priority", ScalarKind::U16)
            .variant("Low", 10)
            .variant("High", 20)
            .sortable(),
    )
    .unwrap();
    reg.define(SequenceDef::new("Path", ScalarKind::U16, K.Named("Point")))
        .unwrap();
    reg.define(AliasDef::new("Amount", K.U64()).sortable())
        .unwrap();
    reg
}

fn fmt<'a>(reg: &'a SchemaRegistry, name: &str) -> TypeFormatter<'a> {
    TypeFormatter::for_type(reg, name).unwrap()
}

fn wire_ops(desc: &MethodDescriptor) -> Vec<WireOp> {
    match &desc.body {
        MethodBody::Template(Template::Wire(ops)) => ops.clone(),
        other => panic!("expected a wire plan, got {other:?}"),
    }
}

fn method_names(descs: &[MethodDescriptor]) -> Vec<String> {
    descs.iter().map(|d| d.name.clone()).collect()
}

// ── Canonical slots ──────────────────────────────────────────────────────────

#[test]
fn required_slot_names_are_canonical() {
    let reg = registry();
    let f = fmt(&reg, "Point");
    assert_eq!(f.ctor_descriptor().name, "new");
    assert_eq!(f.deserialize_descriptor().name, "deserialize");
    assert_eq!(f.serialize_descriptor().name, "serialize");
    assert_eq!(f.size_descriptor().name, "size");
    assert_eq!(f.comparer_descriptor().unwrap().name, "eq");
    assert_eq!(f.sort_descriptor().unwrap().name, "cmp");
    assert_eq!(f.str_descriptor().unwrap().name, "to_string");
    assert_eq!(method_names(&f.getter_descriptors()), ["x", "y"]);
    assert_eq!(method_names(&f.setter_descriptors()), ["set_x", "set_y"]);
}

#[test]
fn slot_shapes_match_the_contract() {
    let reg = registry();
    let f = fmt(&reg, "Point");

    let ctor = f.ctor_descriptor();
    assert_eq!(ctor.arguments.len(), 2);
    assert_eq!(ctor.arguments[0].name, "x");
    assert_eq!(ctor.arguments[0].ty, ValueKind::Ty(K.U16()));
    assert_eq!(
        ctor.body,
        MethodBody::Template(Template::AssignFields(vec![
            "x".to_string(),
            "y".to_string()
        ]))
    );
    assert_eq!(ctor.returns, ValueKind::Unit);
    assert_eq!(ctor.annotations, [Annotation::Public]);

    let deser = f.deserialize_descriptor();
    assert_eq!(deser.arguments.len(), 1);
    assert_eq!(deser.arguments[0].name, "payload");
    assert_eq!(deser.arguments[0].ty, ValueKind::ByteSpan);
    assert_eq!(deser.returns, ValueKind::Ty(K.Named("Point")));
    assert_eq!(deser.annotations, [Annotation::Public, Annotation::Static]);

    let ser = f.serialize_descriptor();
    assert_eq!(ser.returns, ValueKind::ByteSpan);
    assert_eq!(ser.annotations, [Annotation::Public]);

    let size = f.size_descriptor();
    assert_eq!(size.returns, ValueKind::Size);
    assert_eq!(size.annotations, [Annotation::Public, Annotation::Property]);

    let eq = f.comparer_descriptor().unwrap();
    assert_eq!(eq.arguments[0].name, "other");
    assert_eq!(eq.arguments[0].ty, ValueKind::Ty(K.Named("Point")));
    assert_eq!(eq.returns, ValueKind::Bool);

    let cmp = f.sort_descriptor().unwrap();
    assert_eq!(cmp.returns, ValueKind::Ordering);

    let to_string = f.str_descriptor().unwrap();
    assert_eq!(to_string.returns, ValueKind::Text);

    let getter = &f.getter_descriptors()[0];
    assert!(getter.arguments.is_empty());
    assert_eq!(getter.returns, ValueKind::Ty(K.U16()));
    assert_eq!(
        getter.annotations,
        [Annotation::Public, Annotation::Property]
    );

    let setter = &f.setter_descriptors()[0];
    assert_eq!(setter.arguments[0].name, "value");
    assert_eq!(setter.returns, ValueKind::Unit);
    assert_eq!(
        setter.body,
        MethodBody::Template(Template::WriteField("x".to_string()))
    );
}

// ── Records ──────────────────────────────────────────────────────────────────

#[test]
fn record_wire_plan_follows_declaration_order() {
    let reg = registry();
    let f = fmt(&reg, "Header");
    assert_eq!(
        wire_ops(&f.serialize_descriptor()),
        [
            WireOp::Const {
                field: "magic".to_string(),
                kind: ScalarKind::U32,
                value: 0x4655_4257,
            },
            WireOp::Field {
                name: "version".to_string(),
                kind: K.U16(),
            },
            WireOp::Field {
                name: "flags".to_string(),
                kind: K.U8(),
            },
        ]
    );
}

#[test]
fn constant_fields_stay_out_of_ctor_and_accessors() {
    let reg = registry();
    let f = fmt(&reg, "Header");
    let ctor = f.ctor_descriptor();
    let ctor_args: Vec<&str> = ctor.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(ctor_args, ["version", "flags"]);
    assert_eq!(method_names(&f.getter_descriptors()), ["version", "flags"]);
    assert_eq!(
        method_names(&f.setter_descriptors()),
        ["set_version", "set_flags"]
    );
    // The field list itself still carries the constant, in position.
    let fields = f.fields();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].name, "magic");
    assert!(!fields[0].is_data());
}

#[test]
fn serialize_deserialize_and_size_share_one_plan() {
    let reg = registry();
    for name in ["Point", "Header", "Circle", "Color", "Path", "Amount"] {
        let f = fmt(&reg, name);
        let ser = wire_ops(&f.serialize_descriptor());
        assert_eq!(ser, wire_ops(&f.deserialize_descriptor()), "{name}");
        assert_eq!(ser, wire_ops(&f.size_descriptor()), "{name}");
    }
}

#[test]
fn policy_gates_optional_slots() {
    let reg = registry();

    let point = fmt(&reg, "Point");
    assert!(point.comparer_descriptor().is_some());
    assert!(point.sort_descriptor().is_some());
    assert!(point.str_descriptor().is_some());

    // Default policy: comparable and printable, not sortable.
    let header = fmt(&reg, "Header");
    assert!(header.comparer_descriptor().is_some());
    assert!(header.sort_descriptor().is_none());
    assert!(header.str_descriptor().is_some());

    let ghost = fmt(&reg, "Ghost");
    assert!(ghost.comparer_descriptor().is_none());
    assert!(ghost.str_descriptor().is_none());
}

#[test]
fn comparer_and_sort_walk_all_data_fields() {
    let reg = registry();
    let f = fmt(&reg, "Point");
    let eq = f.comparer_descriptor().unwrap();
    assert_eq!(
        eq.body,
        MethodBody::Template(Template::CompareFields(vec![
            "x".to_string(),
            "y".to_string()
        ]))
    );
    let cmp = f.sort_descriptor().unwrap();
    assert_eq!(
        cmp.body,
        MethodBody::Template(Template::OrderBy(vec!["x".to_string(), "y".to_string()]))
    );
}

// ── Hierarchies ──────────────────────────────────────────────────────────────

#[test]
fn base_dispatches_and_owns_the_shared_span() {
    let reg = registry();
    let f = fmt(&reg, "Shape");
    assert!(f.is_abstract());
    assert_eq!(f.base_class_name(), None);

    let dispatch = vec![WireOp::Dispatch {
        tag_kind: ScalarKind::U8,
        arms: vec![
            DispatchArm {
                tag: 1,
                type_name: "Circle".to_string(),
            },
            DispatchArm {
                tag: 2,
                type_name: "Square".to_string(),
            },
        ],
    }];
    assert_eq!(wire_ops(&f.serialize_descriptor()), dispatch);
    assert_eq!(wire_ops(&f.deserialize_descriptor()), dispatch);
    assert_eq!(wire_ops(&f.size_descriptor()), dispatch);

    let protected = f.serialize_protected_descriptor().unwrap();
    assert_eq!(protected.name, "serialize_fields");
    assert_eq!(protected.annotations, [Annotation::Protected]);
    assert_eq!(
        wire_ops(&protected),
        [WireOp::Field {
            name: "layer".to_string(),
            kind: K.U8(),
        }]
    );

    // Instance-level comparisons belong to concrete types.
    assert!(f.comparer_descriptor().is_none());
    assert!(f.sort_descriptor().is_none());

    assert_eq!(f.ctor_descriptor().annotations, [Annotation::Protected]);
    assert_eq!(f.dispatch_table().unwrap().len(), 2);
}

#[test]
fn subtype_prefixes_tag_and_inherited_span() {
    let reg = registry();
    let f = fmt(&reg, "Circle");
    assert!(!f.is_abstract());
    assert_eq!(f.base_class_name(), Some("Shape"));
    assert!(f.serialize_protected_descriptor().is_none());
    assert_eq!(
        wire_ops(&f.serialize_descriptor()),
        [
            WireOp::Tag {
                kind: ScalarKind::U8,
                value: 1,
            },
            WireOp::Inherited {
                base: "Shape".to_string(),
            },
            WireOp::Field {
                name: "radius".to_string(),
                kind: K.U32(),
            },
        ]
    );
}

#[test]
fn subtype_ctor_covers_inherited_then_own_fields() {
    let reg = registry();
    let f = fmt(&reg, "Circle");
    let ctor = f.ctor_descriptor();
    let args: Vec<&str> = ctor.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(args, ["layer", "radius"]);

    // Equality spans the whole instance; accessors only the own span.
    let eq = f.comparer_descriptor().unwrap();
    assert_eq!(
        eq.body,
        MethodBody::Template(Template::CompareFields(vec![
            "layer".to_string(),
            "radius".to_string()
        ]))
    );
    assert_eq!(method_names(&f.getter_descriptors()), ["radius"]);
    assert_eq!(f.fields().len(), 1);
    assert_eq!(f.fields()[0].name, "radius");
}

#[test]
fn subtype_marks_replaced_methods_override() {
    let reg = registry();
    let circle = fmt(&reg, "Circle");
    assert!(circle
        .serialize_descriptor()
        .annotations
        .contains(&Annotation::Override));
    assert!(circle
        .size_descriptor()
        .annotations
        .contains(&Annotation::Override));
    assert!(circle
        .str_descriptor()
        .unwrap()
        .annotations
        .contains(&Annotation::Override));
    // Static deserialize hides rather than overrides.
    assert!(!circle
        .deserialize_descriptor()
        .annotations
        .contains(&Annotation::Override));

    let point = fmt(&reg, "Point");
    assert!(!point
        .serialize_descriptor()
        .annotations
        .contains(&Annotation::Override));
}

// ── Enums ────────────────────────────────────────────────────────────────────

#[test]
fn enum_is_its_discriminant() {
    let reg = registry();
    let f = fmt(&reg, "Color");
    let ctor = f.ctor_descriptor();
    assert_eq!(ctor.arguments.len(), 1);
    assert_eq!(ctor.arguments[0].name, "value");
    assert_eq!(ctor.arguments[0].ty, ValueKind::Ty(K.U8()));

    assert_eq!(
        wire_ops(&f.serialize_descriptor()),
        [WireOp::Discriminant {
            kind: ScalarKind::U8
        }]
    );
    assert!(f.fields().is_empty());
    assert!(f.getter_descriptors().is_empty());
    assert!(f.setter_descriptors().is_empty());

    let eq = f.comparer_descriptor().unwrap();
    assert_eq!(eq.body, MethodBody::Template(Template::CompareDiscriminant));
    assert!(f.sort_descriptor().is_none());

    let to_string = f.str_descriptor().unwrap();
    assert_eq!(
        to_string.body,
        MethodBody::Template(Template::Render(vec!["value".to_string()]))
    );
}

#[test]
fn sortable_enum_orders_by_discriminant() {
    let reg = registry();
    let f = fmt(&reg, "Priority");
    let cmp = f.sort_descriptor().unwrap();
    assert_eq!(cmp.name, "cmp");
    assert_eq!(cmp.body, MethodBody::Template(Template::CompareDiscriminant));
}

// ── Sequences ────────────────────────────────────────────────────────────────

#[test]
fn sequence_wraps_one_elements_field() {
    let reg = registry();
    let f = fmt(&reg, "Path");
    let elements_kind = FieldKind::Vector {
        count: ScalarKind::U16,
        element: Box::new(K.Named("Point")),
    };

    let fields = f.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "elements");
    assert_eq!(fields[0].kind, elements_kind);

    let ctor = f.ctor_descriptor();
    assert_eq!(ctor.arguments.len(), 1);
    assert_eq!(ctor.arguments[0].name, "elements");

    assert_eq!(
        wire_ops(&f.serialize_descriptor()),
        [WireOp::Field {
            name: "elements".to_string(),
            kind: elements_kind,
        }]
    );

    assert_eq!(method_names(&f.getter_descriptors()), ["elements"]);
    assert!(f.setter_descriptors().is_empty());

    let eq = f.comparer_descriptor().unwrap();
    assert_eq!(
        eq.body,
        MethodBody::Template(Template::CompareFields(vec!["elements".to_string()]))
    );
}

// ── Aliases ──────────────────────────────────────────────────────────────────

#[test]
fn alias_wraps_one_value_field() {
    let reg = registry();
    let f = fmt(&reg, "Amount");

    let fields = f.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "value");
    assert_eq!(fields[0].kind, K.U64());

    assert_eq!(
        wire_ops(&f.serialize_descriptor()),
        [WireOp::Field {
            name: "value".to_string(),
            kind: K.U64(),
        }]
    );

    assert_eq!(method_names(&f.getter_descriptors()), ["value"]);
    assert_eq!(method_names(&f.setter_descriptors()), ["set_value"]);

    let cmp = f.sort_descriptor().unwrap();
    assert_eq!(
        cmp.body,
        MethodBody::Template(Template::OrderBy(vec!["value".to_string()]))
    );
}

// ── Determinism and bundling ─────────────────────────────────────────────────

#[test]
fn descriptor_getters_are_idempotent() {
    let reg = registry();
    for name in ["Point", "Header", "Shape", "Circle", "Color", "Path", "Amount"] {
        let f = fmt(&reg, name);
        assert_eq!(f.ctor_descriptor(), f.ctor_descriptor(), "{name}");
        assert_eq!(f.serialize_descriptor(), f.serialize_descriptor(), "{name}");
        assert_eq!(
            f.deserialize_descriptor(),
            f.deserialize_descriptor(),
            "{name}"
        );
        assert_eq!(f.size_descriptor(), f.size_descriptor(), "{name}");
        assert_eq!(f.getter_descriptors(), f.getter_descriptors(), "{name}");
    }
    assert_eq!(bundle(&reg, "Circle").unwrap(), bundle(&reg, "Circle").unwrap());
}

#[test]
fn bundle_fills_every_slot() {
    let reg = registry();

    let circle = bundle(&reg, "Circle").unwrap();
    assert_eq!(circle.type_name, "Circle");
    assert!(!circle.is_abstract);
    assert_eq!(circle.base_class.as_deref(), Some("Shape"));
    assert!(circle.comparer.is_some());
    assert!(circle.serialize_protected.is_none());

    let shape = bundle(&reg, "Shape").unwrap();
    assert!(shape.is_abstract);
    assert!(shape.serialize_protected.is_some());
    assert!(shape.comparer.is_none());
    assert!(shape.sort.is_none());

    let ghost = bundle(&reg, "Ghost").unwrap();
    assert!(ghost.comparer.is_none());
    assert!(ghost.str_.is_none());
}

#[test]
fn bundle_all_walks_declaration_order() {
    let reg = registry();
    let bundles = bundle_all(&reg).unwrap();
    let names: Vec<&str> = bundles.iter().map(|b| b.type_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Point", "Header", "Ghost", "Shape", "Circle", "Square", "Color", "Priority", "Path",
            "Amount"
        ]
    );
}

// ── Front-end hand-off ───────────────────────────────────────────────────────

#[test]
fn registry_received_as_json_bundles_identically() {
    let reg = registry();
    let json = serde_json::to_string(&reg).unwrap();
    let received: SchemaRegistry = serde_json::from_str(&json).unwrap();
    assert_eq!(bundle_all(&received).unwrap(), bundle_all(&reg).unwrap());
}

// ── Schema errors ────────────────────────────────────────────────────────────

#[test]
fn unknown_type_is_reported_by_name() {
    let reg = registry();
    let err = TypeFormatter::for_type(&reg, "Missing").unwrap_err();
    assert_eq!(err, GenError::UnknownType("Missing".to_string()));
}

#[test]
fn constant_fields_must_be_scalar() {
    let mut reg = SchemaRegistry::new();
    reg.define(StructDef::new("Bad").const_field("pad", K.Bytes(4), 0))
        .unwrap();
    let err = TypeFormatter::for_type(&reg, "Bad").unwrap_err();
    assert_eq!(
        err,
        GenError::ConstNotScalar {
            type_name: "Bad".to_string(),
            field: "pad".to_string(),
        }
    );
}
