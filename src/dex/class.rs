//! Class objects and their gather operations

use crate::dex::code::Insn;
use crate::dex::store::{FieldRefId, MethodRefId, TypeId};

/// Class access flags, dex encoding
pub mod access_flags {
    pub const ACC_PUBLIC: u32 = 0x0001;
    pub const ACC_INTERFACE: u32 = 0x0200;
    pub const ACC_ABSTRACT: u32 = 0x0400;
}

/// An instance field declaration
#[derive(Debug, Clone)]
pub struct DexField {
    pub name: String,
    pub ty: TypeId,
}

/// A method declaration together with its code
#[derive(Debug, Clone)]
pub struct DexMethod {
    pub name: String,
    pub is_static: bool,
    pub code: Vec<Insn>,
}

impl DexMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_static: false, code: Vec::new() }
    }
}

/// A class in the packing universe
#[derive(Debug, Clone)]
pub struct DexClass {
    pub ty: TypeId,
    pub access_flags: u32,
    pub super_class: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub ifields: Vec<DexField>,
    pub dmethods: Vec<DexMethod>,
    pub vmethods: Vec<DexMethod>,
    /// False when the class is reachable from non-managed call sites and must
    /// be treated as live no matter what the code walk finds.
    pub renameable: bool,
}

impl DexClass {
    pub fn new(ty: TypeId, access_flags: u32) -> Self {
        Self {
            ty,
            access_flags,
            super_class: None,
            interfaces: Vec::new(),
            ifields: Vec::new(),
            dmethods: Vec::new(),
            vmethods: Vec::new(),
            renameable: true,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & access_flags::ACC_INTERFACE != 0
    }

    /// All methods, direct then virtual.
    pub fn all_methods(&self) -> impl Iterator<Item = &DexMethod> {
        self.dmethods.iter().chain(self.vmethods.iter())
    }

    /// Collect every method ref mentioned in this class's code.
    pub fn gather_methods(&self, out: &mut Vec<MethodRefId>) {
        for method in self.all_methods() {
            for insn in &method.code {
                if let Some(mref) = insn.method_ref() {
                    out.push(mref);
                }
            }
        }
    }

    /// Collect every field ref mentioned in this class's code.
    pub fn gather_fields(&self, out: &mut Vec<FieldRefId>) {
        for method in self.all_methods() {
            for insn in &method.code {
                if let Some(fref) = insn.field_ref() {
                    out.push(fref);
                }
            }
        }
    }

    /// Collect direct structural type references: super class, interfaces,
    /// and instance field types. Instruction operands are not included.
    pub fn gather_types(&self, out: &mut Vec<TypeId>) {
        if let Some(super_class) = self.super_class {
            out.push(super_class);
        }
        out.extend(self.interfaces.iter().copied());
        out.extend(self.ifields.iter().map(|field| field.ty));
    }
}
