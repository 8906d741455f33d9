use serde_json::json;

use crate::fixtures::FixtureGenerator;
use crate::http::ApiRequest;
use crate::testing::{Suite, TestCase};

use super::OK;

/// Date of cart 1 in the store's seed data.
pub const CART_ONE_DATE: &str = "2020-03-02T00:00:00.000Z";
/// Date of cart 2.
pub const CART_TWO_DATE: &str = "2020-01-02T00:00:00.000Z";

pub const UPDATED_USER_ID: u64 = 2;

pub fn carts() -> Suite {
    Suite::new("Carts")
        .case(list_carts)
        .case(create_cart)
        .case(get_cart)
        .case(update_cart)
        .case(delete_cart)
}

pub fn list_carts(_: &mut FixtureGenerator) -> TestCase {
    TestCase::new("list all carts", ApiRequest::get("/carts"))
        .expect_status(OK)
        .expect_body_contains(CART_ONE_DATE)
}

pub fn create_cart(fixtures: &mut FixtureGenerator) -> TestCase {
    let product = fixtures.product();
    let body = json!({
        "userId": 1,
        "products": [product.to_json()],
    });
    TestCase::new("create a cart", ApiRequest::post("/carts").with_json(body))
        .expect_status(OK)
        .expect_body_contains(&product.title)
}

pub fn get_cart(_: &mut FixtureGenerator) -> TestCase {
    TestCase::new("get a single cart", ApiRequest::get("/carts/1"))
        .expect_status(OK)
        .expect_body_contains(CART_ONE_DATE)
}

pub fn update_cart(_: &mut FixtureGenerator) -> TestCase {
    TestCase::new(
        "update a cart",
        ApiRequest::put("/carts/1").with_json(json!({ "userId": UPDATED_USER_ID })),
    )
    .expect_status(OK)
    .expect_body_contains(UPDATED_USER_ID)
    // Stricter than containment alone: fails if the echoed cart drops
    // `userId` or returns it as a string.
    .expect_json_field("userId", UPDATED_USER_ID)
}

pub fn delete_cart(_: &mut FixtureGenerator) -> TestCase {
    TestCase::new("delete a cart", ApiRequest::delete("/carts/2"))
        .expect_status(OK)
        .expect_body_contains(CART_TWO_DATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ApiResponse;
    use crate::testing::Expectation;

    #[test]
    fn create_checks_the_product_title_it_sends() {
        let mut fixtures = FixtureGenerator::seeded(21);
        let case = create_cart(&mut fixtures);

        let body = case.request.body.as_ref().unwrap();
        assert_eq!(body["userId"], 1);
        let title = body["products"][0]["title"].as_str().unwrap();
        assert!(case.expectations.contains(&Expectation::body_contains(title)));
    }

    #[test]
    fn update_checks_user_id_by_containment_and_equality() {
        let case = update_cart(&mut FixtureGenerator::seeded(0));

        assert_eq!(case.request.body, Some(json!({ "userId": 2 })));
        assert_eq!(
            case.expectations,
            vec![
                Expectation::status(200),
                Expectation::body_contains("2"),
                Expectation::json_field("userId", 2),
            ]
        );
    }

    #[test]
    fn update_rejects_a_string_user_id_that_containment_accepts() {
        let case = update_cart(&mut FixtureGenerator::seeded(0));
        let body = r#"{"id":1,"userId":"2","products":[]}"#;
        let response = ApiResponse {
            status: 200,
            status_text: "OK".into(),
            body: body.into(),
            duration_ms: 1,
            size_bytes: body.len(),
        };

        let results = case.evaluate(&response);
        let passed: Vec<bool> = results.iter().map(|result| result.passed).collect();
        assert_eq!(passed, [true, true, false]);
    }

    #[test]
    fn delete_targets_cart_two() {
        let case = delete_cart(&mut FixtureGenerator::seeded(0));
        assert_eq!(case.request.path, "/carts/2");
        assert!(case.expectations.contains(&Expectation::body_contains(CART_TWO_DATE)));
    }
}
