use crate::domain::money::Money;
use crate::domain::ports::ProfileGenerator;
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use std::ops::RangeInclusive;

const NAME_PREFIXES: [&str; 5] = ["AutoPat", "RoboUser", "GenClient", "SysPerson", "BotPassenger"];
const AGE_RANGE: RangeInclusive<u32> = 18..=80;
/// 100.00 to 2000.00, in cents.
const MONEY_CENTS_RANGE: RangeInclusive<i64> = 10_000..=200_000;

/// Draws auto-generated customer details from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomProfileGenerator;

impl RandomProfileGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileGenerator for RandomProfileGenerator {
    fn name(&self, person_id: &str) -> String {
        let prefix = NAME_PREFIXES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(NAME_PREFIXES[0]);
        format!("{prefix}_{person_id}")
    }

    fn age(&self) -> u32 {
        rand::thread_rng().gen_range(AGE_RANGE)
    }

    fn money(&self) -> Money {
        let cents = rand::thread_rng().gen_range(MONEY_CENTS_RANGE);
        Money::new(Decimal::new(cents, 2))
    }
}

/// Returns the same details every time; used where output must be predictable.
#[derive(Debug, Clone)]
pub struct FixedProfileGenerator {
    pub prefix: String,
    pub age: u32,
    pub money: Money,
}

impl ProfileGenerator for FixedProfileGenerator {
    fn name(&self, person_id: &str) -> String {
        format!("{}_{person_id}", self.prefix)
    }

    fn age(&self) -> u32 {
        self.age
    }

    fn money(&self) -> Money {
        self.money
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_random_profiles_stay_in_range() {
        let generator = RandomProfileGenerator::new();
        for _ in 0..200 {
            let age = generator.age();
            assert!(AGE_RANGE.contains(&age));

            let money = generator.money().value();
            assert!(money >= dec!(100.00) && money <= dec!(2000.00));
            assert!(money.scale() <= 2);
        }
    }

    #[test]
    fn test_random_name_embeds_id() {
        let name = RandomProfileGenerator::new().name("CUST0007");
        assert!(name.ends_with("_CUST0007"));
        assert!(NAME_PREFIXES.iter().any(|p| name.starts_with(p)));
    }

    #[test]
    fn test_fixed_profile() {
        let generator = FixedProfileGenerator {
            prefix: "Guest".into(),
            age: 40,
            money: Money::new(dec!(500)),
        };
        assert_eq!(generator.name("CUST0003"), "Guest_CUST0003");
        assert_eq!(generator.age(), 40);
        assert_eq!(generator.money(), Money::new(dec!(500)));
    }
}
