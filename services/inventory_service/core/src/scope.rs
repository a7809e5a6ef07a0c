//! Access scope resolver (C2).
//!
//! A pure function of the caller's location attribute; no database access,
//! so it is unit-testable on its own. Every mutating operation in C3–C6
//! resolves a `Scope` first and consults its `can_*` predicates before
//! touching storage.

/// The caller's operating scope, derived from their `location_id`.
///
/// An empty location id denotes the central grading facility; anything
/// else denotes a specific branch warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Central,
    Branch(String),
}

impl Scope {
    /// Classify a caller's location attribute into a scope token.
    pub fn resolve(location_id: &str) -> Self {
        if location_id.is_empty() {
            Scope::Central
        } else {
            Scope::Branch(location_id.to_string())
        }
    }

    pub fn is_central(&self) -> bool {
        matches!(self, Scope::Central)
    }

    /// Only central may mutate master data (destinations, geographic
    /// hierarchy, varieties).
    pub fn can_mutate_master_data(&self) -> bool {
        self.is_central()
    }

    /// Only central may create, modify, or finalize lots.
    pub fn can_manage_lots(&self) -> bool {
        self.is_central()
    }

    /// A caller may add a lot to a shipment only if the scope matches the
    /// lot's current physical location: central for `current_location_id
    /// IS NULL`, or the matching branch otherwise.
    pub fn can_add_lot_at(&self, lot_current_location_id: Option<&str>) -> bool {
        match (self, lot_current_location_id) {
            (Scope::Central, None) => true,
            (Scope::Branch(loc), Some(lot_loc)) => loc == lot_loc,
            _ => false,
        }
    }

    /// A branch may receive a shipment only at its own location.
    pub fn can_receive_at(&self, destination_location_id: &str) -> bool {
        match self {
            Scope::Central => false,
            Scope::Branch(loc) => loc == destination_location_id,
        }
    }

    /// The location id as stored on rows this scope owns (`""` for
    /// central, matching the wire convention of §4.2).
    pub fn location_id(&self) -> &str {
        match self {
            Scope::Central => "",
            Scope::Branch(loc) => loc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_location_resolves_to_central() {
        assert_eq!(Scope::resolve(""), Scope::Central);
    }

    #[test]
    fn nonempty_location_resolves_to_branch() {
        assert_eq!(Scope::resolve("branch-a"), Scope::Branch("branch-a".to_string()));
    }

    #[test]
    fn central_may_add_only_central_lots() {
        let central = Scope::Central;
        assert!(central.can_add_lot_at(None));
        assert!(!central.can_add_lot_at(Some("branch-a")));
    }

    #[test]
    fn branch_may_add_only_its_own_lots() {
        let branch = Scope::Branch("branch-a".to_string());
        assert!(branch.can_add_lot_at(Some("branch-a")));
        assert!(!branch.can_add_lot_at(Some("branch-b")));
        assert!(!branch.can_add_lot_at(None));
    }

    #[test]
    fn only_central_manages_lots_and_master_data() {
        assert!(Scope::Central.can_manage_lots());
        assert!(!Scope::Branch("b".to_string()).can_manage_lots());
        assert!(Scope::Central.can_mutate_master_data());
        assert!(!Scope::Branch("b".to_string()).can_mutate_master_data());
    }
}
