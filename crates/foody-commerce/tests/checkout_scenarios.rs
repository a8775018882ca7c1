//! End-to-end cart and checkout scenarios.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use foody_commerce::catalog::ProductLookup;
use foody_commerce::notify::NotificationKind;
use foody_commerce::prelude::*;

const SEAFOOD: &str = r#"{
    "meals": [
        {"strMeal": "Baked salmon with fennel", "strMealThumb": "https://img/1.jpg", "idMeal": "52959"},
        {"strMeal": "Cajun spiced fish tacos", "strMealThumb": "https://img/2.jpg", "idMeal": "52819"},
        {"strMeal": "Escovitch Fish", "strMealThumb": "https://img/3.jpg", "idMeal": "52944"}
    ]
}"#;

fn recording_cart() -> (CartStore, Arc<RecordingNotifier>) {
    let recorder = Arc::new(RecordingNotifier::new());
    (CartStore::new(recorder.clone()), recorder)
}

fn fill_valid(flow: &mut CheckoutFlow) {
    flow.set_field(Field::Name, "Ravi Kumar").unwrap();
    flow.set_field(Field::Phone, "+919812345678").unwrap();
    flow.set_field(Field::Email, "ravi@example.in").unwrap();
    flow.set_field(Field::Address, "221B Park Street, Kolkata").unwrap();
}

#[derive(Default)]
struct Routes(Mutex<Vec<String>>);

impl Navigator for Routes {
    fn navigate(&self, route: &str) {
        self.0.lock().unwrap().push(route.to_string());
    }
}

#[test]
fn test_cart_totals_and_order_pricing() {
    let (mut cart, _) = recording_cart();
    let one = Product::new("1", "Paneer Tikka", "p.jpg", Money::new(1000));
    let two = Product::new("2", "Masala Chai", "c.jpg", Money::new(500));
    cart.add_item(&one);
    cart.add_item(&one);
    cart.add_item(&two);

    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total(), Money::new(2500));

    let summary = cart.summary(&PricingPolicy::default());
    assert_eq!(summary.tax, Money::new(125));
    assert_eq!(summary.delivery_fee, Money::new(300));
    assert_eq!(summary.total, Money::new(2925));
    assert_eq!(summary.total.display(), "$29.25");
}

#[test]
fn test_same_product_twice_merges_into_one_line() {
    let (mut cart, recorder) = recording_cart();
    let item = Product::new("7", "Samosa", "s.jpg", Money::new(400));
    cart.add_item(&item);
    cart.add_item(&item);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.total(), Money::new(800));
    assert_eq!(
        recorder.messages(),
        vec![
            "\"Samosa\" added to cart!".to_string(),
            "Added another \"Samosa\" to cart!".to_string(),
        ]
    );
}

#[test]
fn test_quantity_edits_and_removal() {
    let (mut cart, recorder) = recording_cart();
    let item = Product::new("3", "Dosa", "d.jpg", Money::new(650));
    cart.add_item(&item);

    assert!(cart.update_quantity(&item.id, 5));
    assert_eq!(cart.count(), 5);

    cart.update_quantity(&item.id, -1);
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Money::zero());

    let last = recorder.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.message, "\"Dosa\" removed from cart");

    let before = recorder.history().len();
    assert!(cart.remove_item(&ProductId::new("missing")).is_none());
    assert_eq!(recorder.history().len(), before);
}

#[test]
fn test_empty_cart_checkout_shows_empty_view() {
    let (cart, _) = recording_cart();
    let flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
    assert_eq!(flow.state(), &CheckoutState::EmptyCart);
    assert!(!flow.is_submit_enabled());
}

#[test]
fn test_validation_errors_clear_one_at_a_time() {
    let (mut cart, _) = recording_cart();
    cart.add_item(&Product::new("1", "Idli", "i.jpg", Money::new(300)));
    let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());

    assert_eq!(
        flow.begin_submission(&cart).unwrap_err(),
        CommerceError::Validation { count: 4 }
    );

    flow.set_field(Field::Email, "bad-email").unwrap();
    assert!(flow.error_for(Field::Email).is_none());
    assert_eq!(flow.errors().len(), 3);

    assert_eq!(
        flow.begin_submission(&cart).unwrap_err(),
        CommerceError::Validation { count: 4 }
    );
    assert_eq!(flow.error_for(Field::Email), Some("Enter a valid email address"));
}

#[test]
fn test_fixing_one_field_and_resubmitting_keeps_the_rest() {
    let (mut cart, _) = recording_cart();
    cart.add_item(&Product::new("1", "Idli", "i.jpg", Money::new(300)));
    let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());

    assert_eq!(
        flow.begin_submission(&cart).unwrap_err(),
        CommerceError::Validation { count: 4 }
    );

    flow.set_field(Field::Name, "Meera Iyer").unwrap();
    assert_eq!(
        flow.begin_submission(&cart).unwrap_err(),
        CommerceError::Validation { count: 3 }
    );
    assert_eq!(flow.state(), &CheckoutState::Editing);
    assert_eq!(flow.error_for(Field::Name), None);
    assert_eq!(flow.error_for(Field::Phone), Some("Phone number is required"));
    assert_eq!(flow.error_for(Field::Email), Some("Email is required"));
    assert_eq!(flow.error_for(Field::Address), Some("Delivery address is required"));
}

#[tokio::test(start_paused = true)]
async fn test_menu_to_confirmation_and_redirect() {
    let menu = Menu::from_mealdb_json("Seafood", SEAFOOD).unwrap();
    assert_eq!(menu.len(), 3);
    let salmon = menu.find(&ProductId::new("52959")).unwrap().clone();

    let (mut cart, recorder) = recording_cart();
    cart.add_item(&salmon);
    cart.add_item(&menu.items[1]);
    let expected_total = cart.summary(&PricingPolicy::default()).total;

    let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
    fill_valid(&mut flow);

    let gateway = SimulatedGateway::new(Duration::from_secs(2));
    let order = flow.place_order(&mut cart, &gateway).await.unwrap();

    assert_eq!(order.total(), expected_total);
    assert_eq!(order.customer.name, "Ravi Kumar");
    assert_eq!(order.payment_method, PaymentMethod::Cod);
    assert!(cart.is_empty());
    assert_eq!(recorder.last().unwrap().message, "Cart cleared!");

    let routes = Routes::default();
    assert!(flow.follow_redirect(&routes).await);
    assert_eq!(*routes.0.lock().unwrap(), vec!["/".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_submission_keeps_cart_and_retries() {
    let (mut cart, recorder) = recording_cart();
    cart.add_item(&Product::new("5", "Vada Pav", "v.jpg", Money::new(250)));
    let mut flow = CheckoutFlow::enter(&cart, CheckoutOptions::default());
    fill_valid(&mut flow);

    let gateway = SimulatedGateway::new(Duration::from_millis(200)).failing(1);
    let err = flow.place_order(&mut cart, &gateway).await.unwrap_err();
    assert!(matches!(err, CommerceError::SubmissionFailed(_)));
    assert_eq!(cart.count(), 1);
    assert_eq!(recorder.last().unwrap().kind, NotificationKind::Error);

    // Form input survives the failure.
    assert_eq!(flow.form().name, "Ravi Kumar");

    let order = flow.place_order(&mut cart, &gateway).await.unwrap();
    assert_eq!(order.item_count(), 1);
    assert!(matches!(flow.state(), CheckoutState::Success { .. }));
}
