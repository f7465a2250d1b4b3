use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use c2_ir::{Expr, Identifier, IntegerLiteral, StringBuilder};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{FieldDecl, MemberDecl, Qualifiers};

const INT: QualType = QualType::new(TypeId::INT);

/// Counts how many times it has been dropped.
#[derive(Debug)]
struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl Expr for DropCounter {
    fn print_inline(&self, buf: &mut StringBuilder) {
        buf.push('N');
    }

    fn print(&self, buf: &mut StringBuilder, indent: usize) {
        buf.indent(indent);
        buf.push_str("[counter]\n");
    }
}

#[derive(Debug)]
struct CountedMember {
    name: &'static str,
    _counter: DropCounter,
}

impl MemberDecl for CountedMember {
    fn name(&self) -> &str {
        self.name
    }

    fn ty(&self) -> QualType {
        INT
    }
}

#[test]
fn new_context_is_empty() {
    let ctx = TypeContext::new();
    assert!(ctx.is_empty());
    assert_eq!(ctx.len(), 0);
    assert!(ctx.contains(TypeId::VOID));
    assert!(!ctx.contains(TypeId::NONE));
    assert!(!ctx.contains(TypeId::from_raw(TypeId::FIRST_DYNAMIC)));
}

#[test]
fn ids_start_after_builtins() {
    let mut ctx = TypeContext::with_capacity(8);
    let first = ctx.get_enum("Color");
    let second = ctx.get_function(INT);
    assert_eq!(first.raw(), TypeId::FIRST_DYNAMIC);
    assert_eq!(second.raw(), TypeId::FIRST_DYNAMIC + 1);
    assert_eq!(ctx.len(), 2);
}

#[test]
fn iter_follows_creation_order() {
    let mut ctx = TypeContext::new();
    let s = ctx.get_struct(true, "S");
    let u = ctx.get_struct(false, "U");
    let p = ctx.get_pointer(INT).unwrap();
    let kinds: Vec<_> = ctx.iter().map(|(id, ty)| (id, ty.kind())).collect();
    assert_eq!(
        kinds,
        vec![
            (s, TypeKind::Struct),
            (u, TypeKind::Union),
            (p.type_id(), TypeKind::Pointer),
        ]
    );
}

#[test]
fn builtins_resolve_through_registry() {
    let ctx = TypeContext::new();
    let ty = ctx.get(TypeId::F64);
    assert_eq!(ty.builtin(), Some(BuiltinKind::F64));
    assert!(std::ptr::eq(ty, builtin_type(BuiltinKind::F64)));
    assert_eq!(ctx.builtin(BuiltinKind::Bool), QualType::new(TypeId::BOOL));
}

#[test]
fn builtins_are_immutable() {
    let mut ctx = TypeContext::new();
    let err = ctx.get_mut(TypeId::INT).unwrap_err();
    assert!(matches!(err, TypeError::InvalidOperation { op: "get_mut", .. }));
    assert!(ctx.set_members(TypeId::INT, Vec::new()).is_err());
    assert!(ctx.set_canonical_type(TypeId::INT, INT).is_err());
}

#[test]
fn null_and_foreign_lookups_fail() {
    let mut ctx = TypeContext::new();
    assert_eq!(ctx.try_get(TypeId::NONE).unwrap_err(), TypeError::NullType);
    let foreign = TypeId::from_raw(TypeId::FIRST_DYNAMIC + 7);
    assert_eq!(ctx.try_get(foreign).unwrap_err(), TypeError::UnknownType(foreign));
    assert_eq!(ctx.get_mut(foreign).unwrap_err(), TypeError::UnknownType(foreign));
    // Ids between the builtins and the first dynamic slot are never issued.
    let gap = TypeId::from_raw(TypeId::BUILTIN_COUNT);
    assert!(ctx.try_get(gap).is_err());
}

#[test]
#[should_panic(expected = "does not belong to this context")]
fn get_panics_on_foreign_id() {
    let ctx = TypeContext::new();
    let _ = ctx.get(TypeId::from_raw(TypeId::FIRST_DYNAMIC));
}

#[test]
fn pointer_identity() {
    let mut ctx = TypeContext::new();
    let a = ctx.get_pointer(INT).unwrap();
    let b = ctx.get_pointer(INT).unwrap();
    assert_eq!(a, b);
    assert_eq!(ctx.len(), 1);
    assert!(std::ptr::eq(ctx.get(a.type_id()), ctx.get(b.type_id())));
}

#[test]
fn pointers_to_distinct_elements_do_not_alias() {
    let mut ctx = TypeContext::new();
    let to_int = ctx.get_pointer(INT).unwrap();
    let to_u8 = ctx.get_pointer(QualType::new(TypeId::U8)).unwrap();
    let to_const_int = ctx
        .get_pointer(QualType::with_qualifiers(TypeId::INT, Qualifiers::CONST))
        .unwrap();
    assert_ne!(to_int, to_u8);
    assert_ne!(to_int, to_const_int);
    assert_eq!(ctx.len(), 3);
}

#[test]
fn pointer_to_pointer_is_interned_per_level() {
    let mut ctx = TypeContext::new();
    let p = ctx.get_pointer(INT).unwrap();
    let pp = ctx.get_pointer(p).unwrap();
    assert_eq!(ctx.get_pointer(p).unwrap(), pp);
    assert_eq!(ctx.get(pp.type_id()).ref_type(), p);
}

#[test]
fn get_pointer_rejects_null_element() {
    let mut ctx = TypeContext::new();
    let err = ctx.get_pointer(QualType::NULL).unwrap_err();
    assert!(matches!(err, TypeError::InvalidConstruction { kind: TypeKind::Pointer, .. }));
    assert!(ctx.is_empty());
}

#[test]
fn other_factories_never_deduplicate() {
    let mut ctx = TypeContext::new();
    assert_ne!(ctx.get_struct(true, "P"), ctx.get_struct(true, "P"));
    assert_ne!(ctx.get_enum("E"), ctx.get_enum("E"));
    assert_ne!(ctx.get_function(INT), ctx.get_function(INT));
    assert_ne!(ctx.get_array(INT, None).unwrap(), ctx.get_array(INT, None).unwrap());
}

#[test]
fn self_canonical_kinds() {
    let mut ctx = TypeContext::new();
    let s = ctx.get_struct(true, "S");
    let f = ctx.get_function(INT);
    assert_eq!(ctx.get(s).canonical_type(), QualType::new(s));
    assert_eq!(ctx.get(f).canonical_type(), QualType::new(f));

    let p = ctx.get_pointer(INT).unwrap();
    assert!(!ctx.get(p.type_id()).has_canonical_type());
    assert!(ctx.set_canonical_type(s, INT).is_err());
}

#[test]
fn canonical_type_keeps_use_site_qualifiers() {
    let name = Identifier::new("Number");
    let mut ctx = TypeContext::new();
    let alias = ctx.get_user(&name);
    ctx.set_ref_type(alias, INT).unwrap();
    ctx.set_canonical_type(alias, QualType::with_qualifiers(TypeId::INT, Qualifiers::VOLATILE))
        .unwrap();

    let bare = QualType::new(alias);
    let mut constant = bare;
    constant.add_const();
    assert_ne!(bare, constant);

    let canonical = constant.canonical_type(&ctx).unwrap();
    assert_eq!(canonical.type_id(), TypeId::INT);
    assert_eq!(canonical.qualifiers(), Qualifiers::CONST);
    assert_eq!(bare.canonical_type(&ctx).unwrap().qualifiers(), Qualifiers::empty());
}

#[test]
fn user_types_resolve_late() {
    let name = Identifier::qualified("geo", "Point");
    let mut ctx = TypeContext::new();
    let alias = ctx.get_user(&name);
    assert!(ctx.get(alias).ref_type().is_null());
    assert!(ctx.get(alias).user_expr().is_some());

    let target = ctx.get_struct(true, "Point");
    ctx.set_ref_type(alias, QualType::new(target)).unwrap();
    assert_eq!(ctx.get(alias).ref_type(), QualType::new(target));
}

#[test]
fn set_ref_type_rejects_self_alias_and_wrong_kind() {
    let name = Identifier::new("Loop");
    let mut ctx = TypeContext::new();
    let alias = ctx.get_user(&name);
    assert!(ctx.set_ref_type(alias, QualType::new(alias)).is_err());

    let s = ctx.get_struct(true, "S");
    let err = ctx.set_ref_type(s, INT).unwrap_err();
    assert_eq!(err.kind(), Some(TypeKind::Struct));
}

#[test]
fn set_ref_type_rejects_two_node_cycle() {
    let a_name = Identifier::new("A");
    let b_name = Identifier::new("B");
    let mut ctx = TypeContext::new();
    let a = ctx.get_user(&a_name);
    let b = ctx.get_user(&b_name);
    ctx.set_ref_type(a, QualType::new(b)).unwrap();

    let err = ctx.set_ref_type(b, QualType::new(a)).unwrap_err();
    assert!(matches!(err, TypeError::InvalidOperation { op: "set_ref_type", .. }));
    assert!(ctx.get(b).ref_type().is_null());
    assert!(ctx.width(a).is_err());
}

#[test]
fn set_ref_type_rejects_cycle_through_pointer_and_array() {
    let a_name = Identifier::new("A");
    let b_name = Identifier::new("B");
    let mut ctx = TypeContext::new();
    let a = ctx.get_user(&a_name);
    let b = ctx.get_user(&b_name);
    let ptr_to_b = ctx.get_pointer(QualType::new(b)).unwrap();
    let array = ctx.get_array(ptr_to_b, None).unwrap();
    ctx.set_ref_type(a, array).unwrap();

    let ptr_to_a = ctx.get_pointer(QualType::new(a)).unwrap();
    assert!(ctx.set_ref_type(b, ptr_to_a).is_err());
}

#[test]
fn set_ref_type_stops_at_struct_bodies() {
    let name = Identifier::new("Node");
    let mut ctx = TypeContext::new();
    let alias = ctx.get_user(&name);
    let node = ctx.get_struct(true, "Node");
    let next = ctx.get_pointer(QualType::new(alias)).unwrap();
    ctx.set_members(node, vec![Box::new(FieldDecl::new("next", next))]).unwrap();

    ctx.set_ref_type(alias, QualType::new(node)).unwrap();
    assert_eq!(ctx.name_string(next).unwrap(), "(struct)Node*");
}

#[test]
fn function_signature_builds_incrementally() {
    let mut ctx = TypeContext::new();
    let f = ctx.get_function(QualType::new(TypeId::VOID));
    ctx.add_argument(f, INT).unwrap();
    ctx.add_argument(f, QualType::new(TypeId::STRING)).unwrap();
    ctx.set_return_type(f, INT).unwrap();

    let func = ctx.get(f);
    assert_eq!(func.return_type(), INT);
    assert_eq!(func.num_arguments(), 2);
    assert_eq!(func.get_argument(1), QualType::new(TypeId::STRING));
    assert!(func.get_argument(2).is_null());

    let s = ctx.get_struct(true, "S");
    assert!(ctx.add_argument(s, INT).is_err());
}

#[test]
fn set_members_twice_through_context() {
    let mut ctx = TypeContext::new();
    let s = ctx.get_struct(true, "S");
    ctx.set_members(s, vec![Box::new(FieldDecl::new("x", INT))]).unwrap();
    assert!(ctx.set_members(s, Vec::new()).is_err());
    assert_eq!(ctx.get(s).num_members(), 1);
}

#[test]
fn dropping_context_releases_owned_size_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let mut ctx = TypeContext::new();
        let size = ArraySize::Owned(Box::new(DropCounter(Arc::clone(&drops))));
        let array = ctx.get_array(INT, Some(size)).unwrap();
        assert!(ctx.get(array.type_id()).owns_size_expr());
        assert_eq!(drops.load(Ordering::SeqCst), 0);
    }
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_context_keeps_borrowed_size() {
    let drops = Arc::new(AtomicUsize::new(0));
    let shared = DropCounter(Arc::clone(&drops));
    {
        let mut ctx = TypeContext::new();
        let array = ctx.get_array(INT, Some(ArraySize::Borrowed(&shared))).unwrap();
        assert!(!ctx.get(array.type_id()).owns_size_expr());
    }
    assert_eq!(drops.load(Ordering::SeqCst), 0);
    drop(shared);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_context_releases_members_and_signatures() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let mut ctx = TypeContext::new();
        let f = ctx.get_function(INT);
        for arg in [INT, QualType::new(TypeId::U8), QualType::new(TypeId::F32)] {
            ctx.add_argument(f, arg).unwrap();
        }
        assert_eq!(ctx.get(f).num_arguments(), 3);

        let s = ctx.get_struct(true, "Pair");
        let members: Members<'_> = ["a", "b"]
            .into_iter()
            .map(|name| {
                Box::new(CountedMember {
                    name,
                    _counter: DropCounter(Arc::clone(&drops)),
                }) as Box<dyn MemberDecl>
            })
            .collect();
        ctx.set_members(s, members).unwrap();
    }
    assert_eq!(drops.load(Ordering::SeqCst), 2);
    assert_eq!(Arc::strong_count(&drops), 1);
}

#[test]
fn array_of_literal_size() {
    let ten = IntegerLiteral::new(10);
    let mut ctx = TypeContext::new();
    let array = ctx.get_array(INT, Some(ArraySize::Borrowed(&ten))).unwrap();
    assert!(ctx.get(array.type_id()).size_expr().is_some());
    assert_eq!(ctx.get(array.type_id()).ref_type(), INT);
}

fn any_builtin() -> impl Strategy<Value = BuiltinKind> {
    proptest::sample::select(BuiltinKind::ALL.to_vec())
}

fn any_qualifiers() -> impl Strategy<Value = Qualifiers> {
    (0u8..4).prop_map(|bits| Qualifiers::from_bits_truncate(bits << 1))
}

proptest! {
    #[test]
    fn pointer_interning_is_by_exact_handle(
        a in any_builtin(),
        qa in any_qualifiers(),
        b in any_builtin(),
        qb in any_qualifiers(),
    ) {
        let mut ctx = TypeContext::new();
        let ea = QualType::with_qualifiers(a.type_id(), qa);
        let eb = QualType::with_qualifiers(b.type_id(), qb);
        let pa = ctx.get_pointer(ea).unwrap();
        let pb = ctx.get_pointer(eb).unwrap();
        prop_assert_eq!(pa == pb, ea == eb);
        prop_assert_eq!(ctx.get_pointer(ea).unwrap(), pa);
    }

    #[test]
    fn get_argument_is_capped(n in 0usize..12, probe in 0usize..24) {
        let mut ctx = TypeContext::new();
        let f = ctx.get_function(INT);
        let args: Vec<_> = (0..n)
            .map(|i| BuiltinKind::ALL[i % BuiltinKind::ALL.len()].type_id())
            .map(QualType::new)
            .collect();
        for arg in &args {
            ctx.add_argument(f, *arg).unwrap();
        }
        let func = ctx.get(f);
        prop_assert_eq!(func.num_arguments(), n);
        match args.get(probe) {
            Some(expected) => {
                prop_assert_eq!(func.get_argument(probe), *expected);
            }
            None => {
                prop_assert!(func.get_argument(probe).is_null());
            }
        }
    }
}
