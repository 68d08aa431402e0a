//! Input collection gate.
//!
//! [`InputGate`] holds one editable slot per detected call site and exposes a
//! single derived flag, [`InputGate::is_ready`]. A gate is built fresh from
//! each detection pass and consumed by [`InputGate::into_values`]; slots never
//! carry over between runs.

use serde::Serialize;

use crate::detect::SlotDescriptor;
use crate::error::GateError;

/// One editable input slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputSlot {
    pub index: usize,
    pub value: String,
    /// `true` iff `value` is non-blank after trimming.
    pub filled: bool,
    /// Placeholder text for the entry field.
    pub placeholder: String,
}

impl InputSlot {
    fn new(descriptor: &SlotDescriptor) -> Self {
        InputSlot {
            index: descriptor.index,
            value: String::new(),
            filled: false,
            placeholder: descriptor.placeholder(),
        }
    }
}

/// Effect of a single edit on the gate's readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateTransition {
    /// The gate went from not-ready to ready; the run action unlocks now.
    BecameReady,
    /// A previously ready gate has a blank slot again.
    BecameNotReady,
    /// Readiness did not change.
    Unchanged,
}

/// Ordered set of input slots gating submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputGate {
    slots: Vec<InputSlot>,
}

impl InputGate {
    /// Creates one empty slot per descriptor, in detection order.
    pub fn new(descriptors: &[SlotDescriptor]) -> Self {
        InputGate {
            slots: descriptors.iter().map(InputSlot::new).collect(),
        }
    }

    pub fn slots(&self) -> &[InputSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots still blank.
    pub fn missing(&self) -> usize {
        self.slots.iter().filter(|s| !s.filled).count()
    }

    /// `true` iff every slot holds a non-blank value.
    pub fn is_ready(&self) -> bool {
        self.slots.iter().all(|s| s.filled)
    }

    /// Replaces the value of one slot and re-evaluates readiness.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<GateTransition, GateError> {
        let count = self.slots.len();
        let was_ready = self.is_ready();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(GateError::SlotOutOfRange { index, count })?;
        slot.value = value.into();
        slot.filled = !slot.value.trim().is_empty();

        Ok(match (was_ready, self.is_ready()) {
            (false, true) => GateTransition::BecameReady,
            (true, false) => GateTransition::BecameNotReady,
            _ => GateTransition::Unchanged,
        })
    }

    /// Tears the gate down, yielding the slot values in detection order.
    ///
    /// Values are passed through untrimmed; the trim only decides readiness.
    pub fn into_values(self) -> Result<Vec<String>, GateError> {
        let missing = self.missing();
        if missing > 0 {
            return Err(GateError::NotReady {
                missing,
                count: self.slots.len(),
            });
        }
        Ok(self.slots.into_iter().map(|s| s.value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::InputDetector;
    use proptest::prelude::*;

    fn gate_for(src: &str) -> InputGate {
        InputGate::new(&InputDetector::default().detect(src))
    }

    #[test]
    fn one_slot_per_descriptor() {
        let gate = gate_for("a = input('A')\nb = input()\n");
        assert_eq!(gate.len(), 2);
        assert_eq!(gate.slots()[0].placeholder, "A");
        assert_eq!(gate.slots()[1].placeholder, "Input 2");
        assert!(gate.slots().iter().all(|s| s.value.is_empty() && !s.filled));
        assert!(!gate.is_ready());
    }

    #[test]
    fn ready_only_after_last_fill() {
        let mut gate = gate_for("input()\ninput()\ninput()\n");
        assert_eq!(gate.set(2, "c").unwrap(), GateTransition::Unchanged);
        assert_eq!(gate.set(0, "a").unwrap(), GateTransition::Unchanged);
        assert!(!gate.is_ready());
        assert_eq!(gate.set(1, "b").unwrap(), GateTransition::BecameReady);
        assert!(gate.is_ready());
        assert_eq!(gate.set(1, "bb").unwrap(), GateTransition::Unchanged);
    }

    #[test]
    fn whitespace_is_blank() {
        let mut gate = gate_for("input()");
        assert_eq!(gate.set(0, "   \t").unwrap(), GateTransition::Unchanged);
        assert!(!gate.slots()[0].filled);
        assert!(!gate.is_ready());
    }

    #[test]
    fn clearing_a_slot_relocks() {
        let mut gate = gate_for("input()");
        assert_eq!(gate.set(0, "1").unwrap(), GateTransition::BecameReady);
        assert_eq!(gate.set(0, "").unwrap(), GateTransition::BecameNotReady);
        assert!(!gate.is_ready());
    }

    #[test]
    fn out_of_range_index() {
        let mut gate = gate_for("input()");
        assert_eq!(
            gate.set(3, "x"),
            Err(GateError::SlotOutOfRange { index: 3, count: 1 })
        );
    }

    #[test]
    fn into_values_preserves_order_and_text() {
        let mut gate = gate_for("input()\ninput()\n");
        gate.set(1, " second ").unwrap();
        gate.set(0, "first").unwrap();
        assert_eq!(
            gate.into_values().unwrap(),
            vec!["first".to_string(), " second ".to_string()]
        );
    }

    #[test]
    fn into_values_refuses_incomplete() {
        let mut gate = gate_for("input()\ninput()\n");
        gate.set(0, "x").unwrap();
        assert_eq!(
            gate.into_values(),
            Err(GateError::NotReady { missing: 1, count: 2 })
        );
    }

    proptest! {
        #[test]
        fn ready_iff_all_slots_non_blank(
            edits in prop::collection::vec((0usize..4, "[ a-z]{0,3}"), 0..24)
        ) {
            let mut gate = gate_for("input()\ninput()\ninput()\ninput()\n");
            let mut shadow = vec![String::new(); 4];
            let mut became_ready: i32 = 0;
            let mut became_not_ready: i32 = 0;
            for (index, value) in edits {
                match gate.set(index, value.clone()).unwrap() {
                    GateTransition::BecameReady => became_ready += 1,
                    GateTransition::BecameNotReady => became_not_ready += 1,
                    GateTransition::Unchanged => {}
                }
                shadow[index] = value;
                let expected = shadow.iter().all(|v| !v.trim().is_empty());
                prop_assert_eq!(gate.is_ready(), expected);
            }
            // Transitions alternate, so ready flips at most once more than it relocks.
            prop_assert!(became_ready - became_not_ready <= 1);
            prop_assert_eq!(became_ready - became_not_ready == 1, gate.is_ready());
        }
    }
}
