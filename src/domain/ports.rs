use super::money::Money;

/// Source of placeholder customer details for auto-generated customers.
pub trait ProfileGenerator: Send + Sync {
    /// A display name for the customer that will receive `person_id`.
    fn name(&self, person_id: &str) -> String;
    fn age(&self) -> u32;
    fn money(&self) -> Money;
}

pub type ProfileGeneratorBox = Box<dyn ProfileGenerator>;
