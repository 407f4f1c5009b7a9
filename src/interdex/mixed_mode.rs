//! Mixed mode class bookkeeping

use std::collections::HashSet;

use crate::dex::ClassId;

/// Placement category a mixed mode dex may claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexStatus {
    FirstColdstartDex,
    FirstExtendedDex,
    ScrollDex,
}

/// Classes requested for mixed mode placement, the statuses their dex may
/// claim, and which regions of the priority order the packer may disturb
#[derive(Debug, Default)]
pub struct MixedModeInfo {
    classes: Vec<ClassId>,
    class_set: HashSet<ClassId>,
    statuses: HashSet<DexStatus>,
    can_touch_coldstart_set: bool,
    can_touch_coldstart_extended_set: bool,
}

impl MixedModeInfo {
    pub fn new(
        classes: impl IntoIterator<Item = ClassId>,
        statuses: impl IntoIterator<Item = DexStatus>,
        can_touch_coldstart_set: bool,
        can_touch_coldstart_extended_set: bool,
    ) -> Self {
        let mut info = Self {
            can_touch_coldstart_set,
            can_touch_coldstart_extended_set,
            statuses: statuses.into_iter().collect(),
            ..Self::default()
        };
        for class in classes {
            if info.class_set.insert(class) {
                info.classes.push(class);
            }
        }
        info
    }

    pub fn has_predefined_classes(&self) -> bool {
        !self.classes.is_empty()
    }

    pub fn has_status(&self, status: DexStatus) -> bool {
        self.statuses.contains(&status)
    }

    pub fn is_mixed_mode_class(&self, class: ClassId) -> bool {
        self.class_set.contains(&class)
    }

    /// Remaining mixed mode classes, in insertion order.
    pub fn mixed_mode_classes(&self) -> &[ClassId] {
        &self.classes
    }

    pub fn remove_mixed_mode_class(&mut self, class: ClassId) {
        if self.class_set.remove(&class) {
            self.classes.retain(|&c| c != class);
        }
    }

    pub fn remove_all_mixed_mode_classes(&mut self) {
        self.classes.clear();
        self.class_set.clear();
    }

    pub fn can_touch_coldstart_set(&self) -> bool {
        self.can_touch_coldstart_set
    }

    pub fn can_touch_coldstart_extended_set(&self) -> bool {
        self.can_touch_coldstart_extended_set
    }
}
