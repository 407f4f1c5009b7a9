//! The packing state machine
//!
//! Walks the priority list, interprets region markers, applies primary dex
//! policy, and seals dexes as their budgets fill up. Packing is single pass
//! and first fit: order is the contract, not bin optimality.

use std::collections::HashSet;
use std::io::Write;

use tracing::{debug, trace, warn};

use crate::apk::ApkManager;
use crate::common::config::Config;
use crate::common::consts::{
    canary_class_name, CANARY_PREFIX, END_MARKER_FRAGMENT, FIRST_END_MARKER, LAST_END_MARKER,
    MAX_DEX_NUM, MAX_FIELD_REFS, MAX_METHOD_REFS, OBJECT_DESCRIPTOR, SCROLL_LIST_END,
    SCROLL_LIST_START,
};
use crate::common::error::{Error, Result};
use crate::dex::{
    access_flags, ClassId, DexClasses, DexClassesVector, DexStore, FieldRefId, MethodRefId,
};
use crate::interdex::estimator::estimate_linear_alloc;
use crate::interdex::mixed_mode::{DexStatus, MixedModeInfo};
use crate::interdex::plugin::InterDexPlugin;
use crate::interdex::pruner::find_unreferenced_coldstart_classes;
use crate::interdex::stats::InterDexStats;
use crate::interdex::tracker::{DexConfig, DexEmitTracker};

/// The InterDex packing pass over one input universe.
///
/// Owns the emission bookkeeping for the lifetime of one [`run`](Self::run);
/// the class universe itself is only read, except when a missing canary class
/// has to be materialised.
pub struct InterDex<'a> {
    store: &'a mut DexStore,
    dexen: Vec<DexClasses>,
    interdexorder: Vec<String>,
    plugins: Vec<Box<dyn InterDexPlugin>>,
    config: Config,
    mixed_mode_info: MixedModeInfo,
    apk_manager: ApkManager,

    stats: InterDexStats,
    secondary_dexes: usize,
    coldstart_dexes: usize,
    extended_set_dexes: usize,
    scroll_dexes: usize,
    num_mixed_mode_dexes: usize,
    cold_start_set_dex_count: usize,
    scroll_set_dex_count: usize,
}

impl<'a> InterDex<'a> {
    pub fn new(
        store: &'a mut DexStore,
        dexen: Vec<DexClasses>,
        interdexorder: Vec<String>,
        plugins: Vec<Box<dyn InterDexPlugin>>,
        config: Config,
        mixed_mode_info: MixedModeInfo,
        apk_manager: ApkManager,
    ) -> Self {
        Self {
            store,
            dexen,
            interdexorder,
            plugins,
            config,
            mixed_mode_info,
            apk_manager,
            stats: InterDexStats::default(),
            secondary_dexes: 0,
            coldstart_dexes: 0,
            extended_set_dexes: 0,
            scroll_dexes: 0,
            num_mixed_mode_dexes: 0,
            cold_start_set_dex_count: 0,
            scroll_set_dex_count: 0,
        }
    }

    pub fn stats(&self) -> &InterDexStats {
        &self.stats
    }

    pub fn secondary_dexes(&self) -> usize {
        self.secondary_dexes
    }

    pub fn coldstart_dexes(&self) -> usize {
        self.coldstart_dexes
    }

    pub fn extended_set_dexes(&self) -> usize {
        self.extended_set_dexes
    }

    pub fn scroll_dexes(&self) -> usize {
        self.scroll_dexes
    }

    pub fn num_mixed_mode_dexes(&self) -> usize {
        self.num_mixed_mode_dexes
    }

    /// Number of output dexes holding the cold-start set, counted when the
    /// last end marker seals it.
    pub fn cold_start_set_dex_count(&self) -> usize {
        self.cold_start_set_dex_count
    }

    /// Number of output dexes holding the scroll set, counted at the scroll
    /// end marker.
    pub fn scroll_set_dex_count(&self) -> usize {
        self.scroll_set_dex_count
    }

    /// Run the pass, consuming the input partition and priority list.
    pub fn run(&mut self) -> Result<DexClassesVector> {
        let mut interdexorder = std::mem::take(&mut self.interdexorder);
        let dexen = std::mem::take(&mut self.dexen);

        let mut det = DexEmitTracker::new();
        for dex in &dexen {
            for &class_id in dex {
                let name = self.store.class_name(class_id).to_string();
                trace!(class = %name, "adding class to clookup");
                det.clookup.insert(name, class_id);
            }
        }

        let scope: Vec<ClassId> = dexen.iter().flatten().copied().collect();

        let unreferenced_classes = find_unreferenced_coldstart_classes(
            self.store,
            &scope,
            &det,
            &interdexorder,
            self.config.static_prune_classes,
        );

        let mut outdex: DexClassesVector = Vec::new();
        let primary_dex: DexClasses = dexen.first().cloned().unwrap_or_default();

        // When the primary dex cannot be touched, its classes go out through
        // a tracker of their own so none of them can spill into a secondary.
        if !self.config.normal_primary_dex {
            let mut primary_det = DexEmitTracker::new();
            for &class_id in &primary_dex {
                let name = self.store.class_name(class_id).to_string();
                primary_det.clookup.insert(name, class_id);
            }

            // the priority list decides the order inside the primary dex
            let mut coldstart_classes_in_primary = 0usize;
            for entry in &interdexorder {
                let Some(&class_id) = primary_det.clookup.get(entry) else {
                    trace!(entry = %entry, "no such entry");
                    continue;
                };
                if unreferenced_classes.contains(&class_id) {
                    trace!(
                        class = %self.store.class_name(class_id),
                        "no longer linked to coldstart set"
                    );
                    self.stats.cls_skipped_in_primary += 1;
                    continue;
                }
                self.emit_class(
                    &mut primary_det,
                    &mut outdex,
                    class_id,
                    DexConfig::default(),
                    true,
                    false,
                )?;
                coldstart_classes_in_primary += 1;
            }
            for &class_id in &primary_dex {
                self.emit_class(
                    &mut primary_det,
                    &mut outdex,
                    class_id,
                    DexConfig::default(),
                    true,
                    false,
                )?;
            }
            debug!(
                in_priority_list = coldstart_classes_in_primary,
                total = primary_det.outs.len(),
                "primary dex classes taken from the priority list"
            );
            self.flush_out_dex(&mut primary_det, &mut outdex);

            // keep the main tracker from emitting primary classes again
            for &class_id in &primary_dex {
                det.emitted.insert(class_id);
            }
        }

        // With end markers the cold-start set ends where they say; without
        // them it is recomputed over the whole list after the walk.
        let mut end_markers_present = false;

        if self.config.normal_primary_dex && !interdexorder.is_empty() {
            // The primary dex is packed like any other, but its classes must
            // still come first: any primary class not already ordered before
            // the first end marker is pulled to the head of the list.
            let first_end_marker_pos = interdexorder.iter().position(|e| e == FIRST_END_MARKER);
            if first_end_marker_pos.is_none() {
                trace!("couldn't find first dex end marker");
            }
            let first_end = first_end_marker_pos.unwrap_or(interdexorder.len());

            let mut not_already_included: Vec<String> = Vec::new();
            for &class_id in &primary_dex {
                let name = self.store.class_name(class_id);
                match interdexorder.iter().position(|e| e == name) {
                    Some(pos) if pos <= first_end => {
                        trace!(class = %name, "class is in the interdex order, no change required");
                    }
                    _ => {
                        trace!(class = %name, "class is not in the interdex order");
                        not_already_included.push(name.to_string());
                    }
                }
            }
            interdexorder.splice(0..0, not_already_included);
        }

        // Marker positions; a missing marker sits one past the end so the
        // region comparisons below degrade the way the list walk expects.
        let last_end = interdexorder
            .iter()
            .position(|e| e == LAST_END_MARKER)
            .unwrap_or(interdexorder.len());
        let scroll_list_start = interdexorder
            .iter()
            .position(|e| e == SCROLL_LIST_START)
            .unwrap_or(interdexorder.len());
        let scroll_list_end = interdexorder
            .iter()
            .position(|e| e == SCROLL_LIST_END)
            .unwrap_or(interdexorder.len());

        let mut dconfig = DexConfig {
            // a non-empty priority list always opens inside the cold-start set
            is_coldstart: !interdexorder.is_empty(),
            ..DexConfig::default()
        };
        let mut previous_dex = self.secondary_dexes;

        for (idx, entry) in interdexorder.iter().enumerate() {
            let lookup = det.clookup.get(entry).copied();
            let Some(class_id) = lookup else {
                trace!(entry = %entry, "no such entry");
                if entry.contains(END_MARKER_FRAGMENT) {
                    debug!("terminating dex due to DexEndMarker");
                    self.flush_out_secondary(&mut det, &mut outdex, dconfig, false)?;
                    self.cold_start_set_dex_count = outdex.len();
                    end_markers_present = true;

                    if idx == last_end && self.mixed_mode_info.has_predefined_classes() {
                        debug!(
                            "emitting the mixed mode dex between the coldstart set \
                             and the extended set of classes"
                        );
                        let can_touch_interdex_order = self.mixed_mode_info.can_touch_coldstart_set()
                            || self.mixed_mode_info.can_touch_coldstart_extended_set();
                        self.emit_mixed_mode_classes(
                            &interdexorder,
                            &mut det,
                            &mut outdex,
                            can_touch_interdex_order,
                        )?;
                    }
                }
                if self.config.emit_scroll_set_marker && idx == scroll_list_end {
                    // scroll classes get a dex of their own
                    self.flush_out_secondary(&mut det, &mut outdex, dconfig, false)?;
                    self.scroll_set_dex_count = outdex.len() - self.secondary_dexes;
                }
                continue;
            };

            // Keep mixed mode classes out of the cold-start dexes when the
            // cold-start order must not be disturbed.
            if !self.mixed_mode_info.can_touch_coldstart_set()
                && self.mixed_mode_info.is_mixed_mode_class(class_id)
            {
                if last_end > idx {
                    debug!(
                        class = %self.store.class_name(class_id),
                        "part of coldstart classes, removing from the mixed mode set"
                    );
                    self.mixed_mode_info.remove_mixed_mode_class(class_id);
                } else if !self.mixed_mode_info.can_touch_coldstart_extended_set() {
                    // emitting the mixed mode dex is supposed to have cleared
                    // the extended classes already
                    return Err(Error::MixedModeClassStranded {
                        name: self.store.class_name(class_id).to_string(),
                    });
                }
            }

            if unreferenced_classes.contains(&class_id) {
                trace!(
                    class = %self.store.class_name(class_id),
                    "no longer linked to coldstart set"
                );
                self.stats.cls_skipped_in_secondary += 1;
                continue;
            }

            if previous_dex != self.secondary_dexes {
                dconfig.reset();
                previous_dex = self.secondary_dexes;
            }

            // Only the flush at the end of a dex reads these flags, so the
            // cold-start flag can be recomputed per class while the extended
            // and scroll flags accumulate across the dex.
            dconfig.is_coldstart = last_end >= idx;
            dconfig.is_extended_set |= last_end < idx;
            dconfig.has_scroll_cls |= scroll_list_start < idx && scroll_list_end > idx;

            self.emit_class(&mut det, &mut outdex, class_id, dconfig, false, true)?;
        }

        if self.mixed_mode_info.has_predefined_classes() && last_end == interdexorder.len() {
            // no delimiter found; the mixed mode dex goes out here instead
            debug!("emitting the mixed mode dex after the interdex order");
            let can_touch_interdex_order = self.mixed_mode_info.can_touch_coldstart_set()
                || self.mixed_mode_info.can_touch_coldstart_extended_set();
            self.emit_mixed_mode_classes(
                &interdexorder,
                &mut det,
                &mut outdex,
                can_touch_interdex_order,
            )?;
        }

        // Classes pruned out of the cold-start set come back here, past the
        // region they no longer belong to.
        for entry in &interdexorder {
            let lookup = det.clookup.get(entry).copied();
            let Some(class_id) = lookup else {
                trace!(entry = %entry, "no such entry");
                continue;
            };
            if unreferenced_classes.contains(&class_id) {
                self.emit_class(&mut det, &mut outdex, class_id, DexConfig::default(), false, true)?;
            }
        }

        if !end_markers_present {
            // without markers the whole list counts as the cold-start set
            self.cold_start_set_dex_count = outdex.len();
            self.scroll_set_dex_count = 0;
        }

        // Everything the priority list never named, in input order.
        for &class_id in &scope {
            self.emit_class(&mut det, &mut outdex, class_id, DexConfig::default(), false, true)?;
        }

        let mut leftover_classes: Vec<ClassId> = Vec::new();
        for plugin in &mut self.plugins {
            leftover_classes.extend(plugin.leftover_classes());
        }
        for class_id in leftover_classes {
            trace!(
                class = %self.store.class_name(class_id),
                "emitting plugin generated leftover class"
            );
            self.emit_class(&mut det, &mut outdex, class_id, DexConfig::default(), false, false)?;
        }

        if !det.outs.is_empty() {
            self.flush_out_secondary(&mut det, &mut outdex, DexConfig::default(), false)?;
        }

        debug!(
            secondary_dex_count = outdex.len().saturating_sub(1),
            "interdex secondary dex count"
        );
        debug!(
            mrefs = self.stats.methref_count,
            frefs = self.stats.fieldref_count,
            cls = self.stats.cls_count,
            dmeth = self.stats.dmeth_count,
            smeth = self.stats.smeth_count,
            vmeth = self.stats.vmeth_count,
            "global stats"
        );
        debug!(
            primary = self.stats.cls_skipped_in_primary,
            secondary = self.stats.cls_skipped_in_secondary,
            "classes removed from coldstart list by static analysis"
        );

        Ok(outdex)
    }

    /// Try to fit `class_id` into the open dex. If that would overflow a
    /// budget, seal the dex first and admit the class into the fresh one.
    /// That tolerates a single oversize class in secondaries but is fatal
    /// for the primary dex.
    fn emit_class(
        &mut self,
        det: &mut DexEmitTracker,
        outdex: &mut DexClassesVector,
        class_id: ClassId,
        dconfig: DexConfig,
        is_primary: bool,
        check_if_skip: bool,
    ) -> Result<()> {
        if det.emitted.contains(&class_id) || self.is_canary(class_id) {
            return Ok(());
        }
        if check_if_skip && self.should_skip_class(class_id) {
            trace!(class = %self.store.class_name(class_id), "skipping class");
            return Ok(());
        }
        if !is_primary && check_if_skip && self.mixed_mode_info.is_mixed_mode_class(class_id) {
            trace!(class = %self.store.class_name(class_id), "skipping mixed mode class");
            return Ok(());
        }

        let laclazz = estimate_linear_alloc(self.store, self.store.class(class_id));

        // The extra member refs this class would pull into the open dex.
        let mut clazz_mrefs: HashSet<MethodRefId> = HashSet::new();
        let mut clazz_frefs: HashSet<FieldRefId> = HashSet::new();
        self.gather_refs(class_id, &mut clazz_mrefs, &mut clazz_frefs);
        let extra_mrefs = clazz_mrefs.iter().filter(|m| !det.mrefs.contains(*m)).count();
        let extra_frefs = clazz_frefs.iter().filter(|f| !det.frefs.contains(*f)).count();

        // The >= on the ref caps keeps the largest admitted size one below
        // the format limit.
        if det.la_size + laclazz > self.config.linear_alloc_limit
            || det.mrefs.len() + extra_mrefs >= MAX_METHOD_REFS
            || det.frefs.len() + extra_frefs >= MAX_FIELD_REFS
        {
            if is_primary {
                return Err(Error::PrimaryDexOverflow {
                    la_size: det.la_size + laclazz,
                    la_limit: self.config.linear_alloc_limit,
                    mrefs: det.mrefs.len() + extra_mrefs,
                    mref_limit: MAX_METHOD_REFS,
                    frefs: det.frefs.len() + extra_frefs,
                    fref_limit: MAX_FIELD_REFS,
                });
            }
            self.flush_out_secondary(det, outdex, dconfig, false)?;
        }

        det.mrefs.extend(clazz_mrefs.iter().copied());
        det.frefs.extend(clazz_frefs.iter().copied());
        det.la_size += laclazz;
        det.outs.push(class_id);
        det.emitted.insert(class_id);
        self.stats.update_class_stats(self.store.class(class_id));
        Ok(())
    }

    /// Seal the open dex: give plugins a last word, sanity check the ref
    /// bookkeeping, and append the result to the output.
    fn flush_out_dex(&mut self, det: &mut DexEmitTracker, outdex: &mut DexClassesVector) {
        let mut dc: DexClasses = det.outs.clone();
        for &class_id in &dc {
            trace!(class = %self.store.class_name(class_id), "emitting class");
        }

        let mut additions: Vec<ClassId> = Vec::new();
        for plugin in &mut self.plugins {
            additions.extend(plugin.additional_classes(self.store, outdex, &det.outs));
        }
        for &class_id in &additions {
            trace!(
                class = %self.store.class_name(class_id),
                "emitting plugin-generated class"
            );
        }
        dc.extend(additions.iter().copied());
        det.emitted.extend(additions.iter().copied());

        self.check_refs_count(det, &dc);

        outdex.push(dc);
        self.stats
            .update_dex_stats(det.outs.len(), det.mrefs.len(), det.frefs.len());
        det.start_new_dex();
    }

    /// Seal a secondary dex: update the region counters, drop in the canary
    /// class, and record a mixed mode dex when this one claims the slot.
    fn flush_out_secondary(
        &mut self,
        det: &mut DexEmitTracker,
        outdex: &mut DexClassesVector,
        dconfig: DexConfig,
        mut mixed_mode_dex: bool,
    ) -> Result<()> {
        // never emit empty dexes
        if det.outs.is_empty() {
            return Ok(());
        }

        mixed_mode_dex |= self.is_mixed_mode_dex(dconfig);

        self.secondary_dexes += 1;
        if dconfig.is_coldstart {
            self.coldstart_dexes += 1;
        }
        if dconfig.is_extended_set {
            self.extended_set_dexes += 1;
        }
        if dconfig.has_scroll_cls {
            self.scroll_dexes += 1;
        }
        debug!(
            dex = self.secondary_dexes,
            coldstart = dconfig.is_coldstart,
            extended_set = dconfig.is_extended_set,
            scroll = dconfig.has_scroll_cls,
            "writing out secondary dex"
        );

        if self.config.emit_canaries {
            let dexnum = outdex.len();
            if dexnum > MAX_DEX_NUM {
                return Err(Error::DexNumberExceeded { dexnum });
            }
            let canary_name = canary_class_name(dexnum);
            match det.clookup.get(&canary_name).copied() {
                Some(class_id) => det.outs.push(class_id),
                None => {
                    warn!(canary = %canary_name, "no canary class found");
                    // the pass can grow more dexes than the input shipped
                    // canaries for
                    let ty = self.store.type_id(&canary_name);
                    let class_id = match self.store.class_of(ty) {
                        Some(existing) => existing,
                        None => {
                            let object = self.store.type_id(OBJECT_DESCRIPTOR);
                            self.store.make_synthetic_class(
                                &canary_name,
                                access_flags::ACC_PUBLIC
                                    | access_flags::ACC_INTERFACE
                                    | access_flags::ACC_ABSTRACT,
                                object,
                            )
                        }
                    };
                    det.outs.push(class_id);
                }
            }

            if mixed_mode_dex {
                if self.num_mixed_mode_dexes > 0 {
                    return Err(Error::SecondMixedModeDex);
                }
                debug!(
                    dex = self.secondary_dexes,
                    "secondary dex is considered for mixed mode"
                );
                self.num_mixed_mode_dexes += 1;
                let mut mixed_mode_file = self.apk_manager.new_asset_file("mixed_mode.txt")?;
                writeln!(mixed_mode_file, "{canary_name}")?;
            }
        }

        self.flush_out_dex(det, outdex);
        Ok(())
    }

    /// Emit the mixed mode classes into a dex of their own, respecting the
    /// priority order for those it names. Called at most once per run.
    fn emit_mixed_mode_classes(
        &mut self,
        interdexorder: &[String],
        det: &mut DexEmitTracker,
        outdex: &mut DexClassesVector,
        can_touch_interdex_order: bool,
    ) -> Result<()> {
        // Cold-start mixed mode classes were already dropped from the set
        // when the cold-start order couldn't be disturbed; what's left is the
        // extended portion.
        for entry in interdexorder {
            let lookup = det.clookup.get(entry).copied();
            let Some(class_id) = lookup else { continue };
            if self.mixed_mode_info.is_mixed_mode_class(class_id) {
                if can_touch_interdex_order {
                    debug!(
                        class = %self.store.class_name(class_id),
                        "emitting mixed mode class that is also in the interdex list"
                    );
                    self.emit_class(det, outdex, class_id, DexConfig::default(), false, false)?;
                }
                self.mixed_mode_info.remove_mixed_mode_class(class_id);
            }
        }

        let remaining: Vec<ClassId> = self.mixed_mode_info.mixed_mode_classes().to_vec();
        for class_id in remaining {
            let name = self.store.class_name(class_id).to_string();
            if !det.clookup.contains_key(&name) {
                debug!(class = %name, "ignoring mixed mode class not found in dexes");
                continue;
            }
            debug!(class = %name, "emitting mixed mode class");
            self.emit_class(det, outdex, class_id, DexConfig::default(), false, false)?;
        }

        if !det.outs.is_empty() {
            self.flush_out_secondary(det, outdex, DexConfig::default(), true)?;
        }

        self.mixed_mode_info.remove_all_mixed_mode_classes();
        Ok(())
    }

    /// First dex to satisfy one of the requested statuses claims the mixed
    /// mode slot.
    fn is_mixed_mode_dex(&self, dconfig: DexConfig) -> bool {
        if self.coldstart_dexes == 0
            && dconfig.is_coldstart
            && self.mixed_mode_info.has_status(DexStatus::FirstColdstartDex)
        {
            return true;
        }
        if self.extended_set_dexes == 0
            && dconfig.is_extended_set
            && self.mixed_mode_info.has_status(DexStatus::FirstExtendedDex)
        {
            return true;
        }
        if self.scroll_dexes == 0
            && dconfig.has_scroll_cls
            && self.mixed_mode_info.has_status(DexStatus::ScrollDex)
        {
            return true;
        }
        false
    }

    /// Did gather_refs predict every ref that ultimately ended up in the dex?
    /// A shortfall means a plugin under-reported; warn and keep going.
    fn check_refs_count(&self, det: &DexEmitTracker, dc: &[ClassId]) {
        let mut mrefs: Vec<MethodRefId> = Vec::new();
        for &class_id in dc {
            self.store.class(class_id).gather_methods(&mut mrefs);
        }
        let mrefs_set: HashSet<MethodRefId> = mrefs.into_iter().collect();
        if mrefs_set.len() > det.mrefs.len() {
            for mref in &mrefs_set {
                if !det.mrefs.contains(mref) {
                    warn!(
                        mref = %self.store.show_method_ref(*mref),
                        "could not find method ref in predicted mrefs set"
                    );
                }
            }
        }

        let mut frefs: Vec<FieldRefId> = Vec::new();
        for &class_id in dc {
            self.store.class(class_id).gather_fields(&mut frefs);
        }
        let frefs_set: HashSet<FieldRefId> = frefs.into_iter().collect();
        if frefs_set.len() > det.frefs.len() {
            for fref in &frefs_set {
                if !det.frefs.contains(fref) {
                    warn!(
                        fref = %self.store.show_field_ref(*fref),
                        "could not find field ref in predicted frefs set"
                    );
                }
            }
        }

        debug!(
            classes = det.outs.len(),
            la_size = det.la_size,
            la_limit = self.config.linear_alloc_limit,
            predicted_mrefs = det.mrefs.len(),
            actual_mrefs = mrefs_set.len(),
            max_mrefs = MAX_METHOD_REFS,
            predicted_frefs = det.frefs.len(),
            actual_frefs = frefs_set.len(),
            max_frefs = MAX_FIELD_REFS,
            "terminating dex"
        );
    }

    /// Member refs the class will need at emission time: its own, plus
    /// whatever the plugins know will be there.
    fn gather_refs(
        &self,
        class_id: ClassId,
        mrefs: &mut HashSet<MethodRefId>,
        frefs: &mut HashSet<FieldRefId>,
    ) {
        let mut method_refs: Vec<MethodRefId> = Vec::new();
        let mut field_refs: Vec<FieldRefId> = Vec::new();
        let class = self.store.class(class_id);
        class.gather_methods(&mut method_refs);
        class.gather_fields(&mut field_refs);
        for plugin in &self.plugins {
            plugin.gather_mrefs(self.store, class_id, &mut method_refs, &mut field_refs);
        }
        mrefs.extend(method_refs);
        frefs.extend(field_refs);
    }

    fn should_skip_class(&self, class_id: ClassId) -> bool {
        self.plugins
            .iter()
            .any(|plugin| plugin.should_skip_class(self.store, class_id))
    }

    fn is_canary(&self, class_id: ClassId) -> bool {
        self.store.class_name(class_id).starts_with(CANARY_PREFIX)
    }
}
