use serde_json::json;

use crate::fixtures::FixtureGenerator;
use crate::http::ApiRequest;
use crate::testing::{Suite, TestCase};

use super::OK;

/// Title of product 1 in the store's seed data.
pub const BACKPACK_TITLE: &str = "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops";
/// Title of product 2, trailing space included.
pub const SLIM_FIT_TITLE: &str = "Mens Casual Premium Slim Fit T-Shirts ";

pub fn products() -> Suite {
    Suite::new("Products")
        .case(list_products)
        .case(create_product)
        .case(get_product)
        .case(update_product)
        .case(delete_product)
}

pub fn list_products(_: &mut FixtureGenerator) -> TestCase {
    TestCase::new("list all products", ApiRequest::get("/products"))
        .expect_status(OK)
        .expect_body_contains(BACKPACK_TITLE)
}

pub fn create_product(fixtures: &mut FixtureGenerator) -> TestCase {
    let product = fixtures.product();
    TestCase::new("create a product", ApiRequest::post("/products").with_json(product.to_json()))
        .expect_status(OK)
        .expect_body_contains(&product.title)
}

pub fn get_product(_: &mut FixtureGenerator) -> TestCase {
    TestCase::new("get a single product", ApiRequest::get("/products/1"))
        .expect_status(OK)
        .expect_body_contains(BACKPACK_TITLE)
}

pub fn update_product(fixtures: &mut FixtureGenerator) -> TestCase {
    let category = fixtures.product_material();
    TestCase::new(
        "update a product",
        ApiRequest::put("/products/1").with_json(json!({ "category": category })),
    )
    .expect_status(OK)
    .expect_body_contains(&category)
}

pub fn delete_product(_: &mut FixtureGenerator) -> TestCase {
    TestCase::new("delete a product", ApiRequest::delete("/products/2"))
        .expect_status(OK)
        .expect_body_contains(SLIM_FIT_TITLE)
}
