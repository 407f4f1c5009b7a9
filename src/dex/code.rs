//! Instruction view exposed to the packer

use crate::dex::store::{FieldRefId, MethodRefId, TypeId};

/// A single instruction, as far as the packer can observe it: at most one
/// method, field, or type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insn {
    /// Any invoke form against a method declaration.
    Invoke(MethodRefId),
    /// Any get/put form against a field declaration.
    FieldAccess(FieldRefId),
    /// const-class, new-instance, check-cast and friends.
    TypeOp(TypeId),
    /// Everything without a member or type operand.
    Opaque,
}

impl Insn {
    pub fn method_ref(&self) -> Option<MethodRefId> {
        match self {
            Insn::Invoke(mref) => Some(*mref),
            _ => None,
        }
    }

    pub fn field_ref(&self) -> Option<FieldRefId> {
        match self {
            Insn::FieldAccess(fref) => Some(*fref),
            _ => None,
        }
    }

    pub fn type_ref(&self) -> Option<TypeId> {
        match self {
            Insn::TypeOp(ty) => Some(*ty),
            _ => None,
        }
    }
}
