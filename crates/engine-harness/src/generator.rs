//! Seeded random order flow.
//!
//! Prices are uniform over `[base_price, base_price + price_range)`,
//! quantities over `[1, max_quantity]`, sides 50/50. The same seed always
//! yields the same sequence of (side, price, quantity).

use engine_core::{Order, Price, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub symbol: String,
    pub base_price: i64,
    pub price_range: u32,
    pub max_quantity: u64,
}

pub struct OrderGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
    generated: u64,
}

impl OrderGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        OrderGenerator {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            generated: 0,
        }
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Next pending limit order.
    pub fn next_order(&mut self) -> Order {
        let side = if self.rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let offset = self.rng.gen_range(0..self.config.price_range.max(1));
        let price = Price::new(self.config.base_price.saturating_add(i64::from(offset)));
        let quantity = self.rng.gen_range(1..=self.config.max_quantity.max(1));

        self.generated += 1;
        Order::limit(self.config.symbol.clone(), side, price, quantity)
    }
}

impl Iterator for OrderGenerator {
    type Item = Order;

    fn next(&mut self) -> Option<Order> {
        Some(self.next_order())
    }
}
