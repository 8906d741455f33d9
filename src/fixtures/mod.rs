//! # Fixtures
//!
//! Fake commerce data for the create and update checks. A fresh generator is
//! seeded from OS entropy per run; tests pin a seed for reproducible values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};

/// Placeholder image URL sent with every generated product.
pub const PRODUCT_IMAGE: &str = "http://example.com";

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Handmade", "Licensed",
    "Refined", "Unbranded", "Tasty", "Elegant", "Bespoke", "Modern", "Recycled", "Oriental",
];

const MATERIALS: &[&str] = &[
    "Steel", "Bronze", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal",
    "Soft", "Fresh", "Frozen",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants", "Shirt",
    "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese", "Bacon",
    "Pizza", "Salad", "Sausages", "Chips",
];

const DESCRIPTIONS: &[&str] = &[
    "Ergonomic executive chair upholstered in bonded black leather and PVC padded seat and back for all-day comfort and support",
    "The automobile layout consists of a front-engine design, with transaxle-type transmissions mounted at the rear of the engine and four wheel drive",
    "New range of formal shirts are designed keeping you in mind. With fits and styling that will make you stand apart",
    "The beautiful range of Apple Naturale that has an exciting mix of natural ingredients. With the Goodness of 100% Natural Ingredients",
    "Andy shoes are designed to keeping in mind durability as well as trends, the most stylish range of shoes & sandals",
    "The slim & simple Maple Gaming Keyboard from Dev Byte comes with a sleek body and 7- Color RGB LED Back-lighting for smart functionality",
    "Carbonite web goalkeeper gloves are ergonomically designed to give easy fit",
    "The Football Is Good For Training And Recreational Purposes",
];

/// Values for one generated product, reused verbatim in the request body and
/// in the response check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFixture {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
}

impl ProductFixture {
    pub fn to_json(&self) -> Value {
        json!({
            "title": self.title,
            "price": self.price,
            "description": self.description,
            "category": self.category,
            "image": PRODUCT_IMAGE,
        })
    }
}

pub struct FixtureGenerator {
    rng: StdRng,
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words[self.rng.gen_range(0..words.len())]
    }

    /// "Adjective Material Product", e.g. `Rustic Granite Chair`.
    pub fn product_name(&mut self) -> String {
        let adjective = self.pick(ADJECTIVES);
        let material = self.pick(MATERIALS);
        let product = self.pick(PRODUCTS);
        format!("{adjective} {material} {product}")
    }

    /// A price between 1.00 and 1000.00 with two fraction digits.
    pub fn price(&mut self) -> String {
        let cents: u32 = self.rng.gen_range(100..=100_000);
        format!("{}.{:02}", cents / 100, cents % 100)
    }

    pub fn product_description(&mut self) -> String {
        self.pick(DESCRIPTIONS).to_string()
    }

    pub fn product_material(&mut self) -> String {
        self.pick(MATERIALS).to_string()
    }

    pub fn product(&mut self) -> ProductFixture {
        ProductFixture {
            title: self.product_name(),
            price: self.price(),
            description: self.product_description(),
            category: self.product_material(),
        }
    }
}
