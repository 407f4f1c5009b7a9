//! Interned types, member references, and the class registry
//!
//! Handles are plain indices minted by the store. Two method or field refs
//! compare equal iff they name the same declaration, which holds iff they
//! intern to the same handle.

use std::collections::HashMap;

use crate::dex::class::DexClass;

/// Interned type descriptor handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

/// Registered class handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

/// Method declaration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodRefId(u32);

/// Field declaration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRefId(u32);

#[derive(Debug)]
struct MemberRefData {
    owner: TypeId,
    name: String,
}

/// Registry of every type, class, and member reference the packer can see
#[derive(Debug, Default)]
pub struct DexStore {
    type_names: Vec<String>,
    type_lookup: HashMap<String, TypeId>,
    classes: Vec<DexClass>,
    class_by_type: HashMap<TypeId, ClassId>,
    method_refs: Vec<MemberRefData>,
    method_ref_lookup: HashMap<(TypeId, String), MethodRefId>,
    field_refs: Vec<MemberRefData>,
    field_ref_lookup: HashMap<(TypeId, String), FieldRefId>,
}

impl DexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a type descriptor.
    pub fn type_id(&mut self, descriptor: &str) -> TypeId {
        if let Some(&ty) = self.type_lookup.get(descriptor) {
            return ty;
        }
        let ty = TypeId(self.type_names.len() as u32);
        self.type_names.push(descriptor.to_string());
        self.type_lookup.insert(descriptor.to_string(), ty);
        ty
    }

    pub fn type_name(&self, ty: TypeId) -> &str {
        &self.type_names[ty.0 as usize]
    }

    /// Declaration handle for a method of `owner`.
    pub fn method_ref(&mut self, owner: TypeId, name: &str) -> MethodRefId {
        if let Some(&mref) = self.method_ref_lookup.get(&(owner, name.to_string())) {
            return mref;
        }
        let mref = MethodRefId(self.method_refs.len() as u32);
        self.method_refs.push(MemberRefData { owner, name: name.to_string() });
        self.method_ref_lookup.insert((owner, name.to_string()), mref);
        mref
    }

    pub fn method_ref_owner(&self, mref: MethodRefId) -> TypeId {
        self.method_refs[mref.0 as usize].owner
    }

    /// Declaration handle for a field of `owner`.
    pub fn field_ref(&mut self, owner: TypeId, name: &str) -> FieldRefId {
        if let Some(&fref) = self.field_ref_lookup.get(&(owner, name.to_string())) {
            return fref;
        }
        let fref = FieldRefId(self.field_refs.len() as u32);
        self.field_refs.push(MemberRefData { owner, name: name.to_string() });
        self.field_ref_lookup.insert((owner, name.to_string()), fref);
        fref
    }

    pub fn field_ref_owner(&self, fref: FieldRefId) -> TypeId {
        self.field_refs[fref.0 as usize].owner
    }

    /// Human-readable form of a method ref for diagnostics.
    pub fn show_method_ref(&self, mref: MethodRefId) -> String {
        let data = &self.method_refs[mref.0 as usize];
        format!("{}.{}", self.type_name(data.owner), data.name)
    }

    /// Human-readable form of a field ref for diagnostics.
    pub fn show_field_ref(&self, fref: FieldRefId) -> String {
        let data = &self.field_refs[fref.0 as usize];
        format!("{}.{}", self.type_name(data.owner), data.name)
    }

    /// Register a class definition for its type.
    pub fn add_class(&mut self, class: DexClass) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.class_by_type.insert(class.ty, id);
        self.classes.push(class);
        id
    }

    pub fn class(&self, id: ClassId) -> &DexClass {
        &self.classes[id.0 as usize]
    }

    /// Descriptor of a class, via its type.
    pub fn class_name(&self, id: ClassId) -> &str {
        self.type_name(self.class(id).ty)
    }

    /// Defining class of a type, when the type resolves to one.
    pub fn class_of(&self, ty: TypeId) -> Option<ClassId> {
        self.class_by_type.get(&ty).copied()
    }

    /// Materialise a class for a type that has no definition yet. Synthetic
    /// classes are never renameable.
    pub fn make_synthetic_class(
        &mut self,
        descriptor: &str,
        access_flags: u32,
        super_class: TypeId,
    ) -> ClassId {
        let ty = self.type_id(descriptor);
        let mut class = DexClass::new(ty, access_flags);
        class.super_class = Some(super_class);
        class.renameable = false;
        self.add_class(class)
    }
}
