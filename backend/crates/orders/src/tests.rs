//! Use-case and router tests for the orders crate

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use auth::application::{RegisterInput, RegisterUseCase};
    use auth::domain::value_object::user_role::UserRole;
    use auth::{AuthConfig, AuthGate, InMemoryUserRepository};
    use chrono::{DateTime, TimeZone, Utc};
    use kernel::id::{ProductId, UserId};
    use platform::clock::{Clock, ManualClock};
    use rust_decimal::Decimal;

    use crate::application::config::OrderConfig;
    use crate::application::{
        CreateOrderInput, CreateOrderUseCase, LineItemInput, ManageProductsUseCase,
        ShippingAddressInput,
    };
    use crate::domain::entity::order::Order;
    use crate::domain::entity::product::{ProductDraft, ProductFacets};
    use crate::error::OrderResult;
    use crate::infra::memory::{InMemoryOrderRepository, InMemoryProductCatalog};
    use crate::presentation::handlers::OrdersAppState;

    pub fn march_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    pub struct Harness {
        pub orders: Arc<InMemoryOrderRepository>,
        pub catalog: Arc<InMemoryProductCatalog>,
        pub users: Arc<InMemoryUserRepository>,
        pub auth_config: Arc<AuthConfig>,
        pub config: Arc<OrderConfig>,
        pub clock: Arc<ManualClock>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                orders: Arc::new(InMemoryOrderRepository::new()),
                catalog: Arc::new(InMemoryProductCatalog::new()),
                users: Arc::new(InMemoryUserRepository::new()),
                auth_config: Arc::new(AuthConfig::with_secret(vec![9u8; 32])),
                config: Arc::new(OrderConfig::default()),
                clock: Arc::new(ManualClock::new(march_2025())),
            }
        }

        pub fn clock(&self) -> Arc<dyn Clock> {
            self.clock.clone()
        }

        pub fn state(
            &self,
        ) -> OrdersAppState<InMemoryOrderRepository, InMemoryProductCatalog, InMemoryUserRepository>
        {
            OrdersAppState {
                orders: self.orders.clone(),
                catalog: self.catalog.clone(),
                gate: AuthGate::new(self.users.clone(), self.auth_config.clone(), self.clock()),
                config: self.config.clone(),
                clock: self.clock(),
            }
        }

        pub fn create_order(
            &self,
        ) -> CreateOrderUseCase<InMemoryOrderRepository, InMemoryProductCatalog> {
            CreateOrderUseCase::new(
                self.orders.clone(),
                self.catalog.clone(),
                self.config.clone(),
                self.clock(),
            )
        }

        /// Add a robe priced in cents
        pub async fn product(&self, name: &str, cents: i64) -> ProductId {
            ManageProductsUseCase::new(self.catalog.clone(), self.clock())
                .create(ProductDraft {
                    name: name.to_string(),
                    description: format!("{name} en coton"),
                    price: Decimal::new(cents, 2),
                    stock: 10,
                    category: "robes".to_string(),
                    sizes: vec!["M".to_string()],
                    colors: vec!["noir".to_string()],
                    image: None,
                    facets: ProductFacets::default(),
                })
                .await
                .unwrap()
                .product_id
        }

        /// Register an account and return its id and session token
        pub async fn account(&self, email: &str, role: UserRole) -> (UserId, String) {
            let output = RegisterUseCase::new(self.users.clone(), self.auth_config.clone(), self.clock())
                .register(
                    RegisterInput {
                        email: email.to_string(),
                        password: "secret1".to_string(),
                        first_name: "Camille".to_string(),
                        last_name: "Durand".to_string(),
                    },
                    role,
                )
                .await
                .unwrap();
            (output.user.user_id, output.token)
        }

        pub async fn place(
            &self,
            user_id: Option<UserId>,
            items: &[(ProductId, i64)],
        ) -> OrderResult<Order> {
            self.create_order().execute(input(user_id, items)).await
        }
    }

    pub fn address() -> ShippingAddressInput {
        ShippingAddressInput {
            street: "12 rue des Lilas".to_string(),
            city: "Lyon".to_string(),
            state: "Rhône".to_string(),
            postal_code: "69003".to_string(),
            country: "France".to_string(),
        }
    }

    pub fn input(user_id: Option<UserId>, items: &[(ProductId, i64)]) -> CreateOrderInput {
        CreateOrderInput {
            user_id,
            items: items
                .iter()
                .map(|(product_id, quantity)| LineItemInput {
                    product_id: *product_id,
                    quantity: *quantity,
                })
                .collect(),
            shipping_address: Some(address()),
            total_amount: None,
        }
    }
}

#[cfg(test)]
mod create_order_tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use chrono::TimeZone;
    use kernel::id::ProductId;
    use rust_decimal::Decimal;
    use tokio::task::JoinSet;

    use super::support::*;
    use crate::domain::repository::OrderRepository;
    use crate::error::OrderError;

    #[tokio::test]
    async fn test_invoice_numbers_follow_the_month() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;

        let first = h.place(None, &[(robe, 1)]).await.unwrap();
        let second = h.place(None, &[(robe, 2)]).await.unwrap();
        assert_eq!(first.invoice_number.as_str(), "INV-2503-0001");
        assert_eq!(second.invoice_number.as_str(), "INV-2503-0002");

        h.clock
            .set(chrono::Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap());
        let april = h.place(None, &[(robe, 1)]).await.unwrap();
        assert_eq!(april.invoice_number.as_str(), "INV-2504-0001");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_orders_get_distinct_consecutive_invoice_numbers() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;
        let create_order = Arc::new(h.create_order());

        let mut placements = JoinSet::new();
        for _ in 0..50 {
            let create_order = create_order.clone();
            placements.spawn(async move { create_order.execute(input(None, &[(robe, 1)])).await });
        }

        let mut numbers = BTreeSet::new();
        while let Some(placed) = placements.join_next().await {
            let order = placed.unwrap().unwrap();
            numbers.insert(order.invoice_number.as_str().to_string());
        }

        let expected: BTreeSet<String> = (1..=50).map(|n| format!("INV-2503-{n:04}")).collect();
        assert_eq!(numbers, expected);
        assert_eq!(h.orders.list(None).await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_total_is_computed_from_catalog_prices() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;
        let foulard = h.product("Foulard", 1250).await;

        let order = h.place(None, &[(robe, 2), (foulard, 1)]).await.unwrap();

        assert_eq!(order.total_amount, Decimal::new(11230, 2));
        assert_eq!(order.items[0].unit_price, Decimal::new(4990, 2));
        assert_eq!(order.items[1].unit_price, Decimal::new(1250, 2));
        assert_eq!(order.status.code(), "pending");
        assert_eq!(order.payment_status.code(), "pending");
        assert!(order.user_id.is_none());
    }

    #[tokio::test]
    async fn test_same_product_on_two_lines() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 1000).await;

        let order = h.place(None, &[(robe, 1), (robe, 3)]).await.unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_amount, Decimal::new(4000, 2));
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected_without_consuming_a_number() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;
        let ghost = ProductId::new();

        let err = h.place(None, &[(robe, 1), (ghost, 1)]).await.unwrap_err();
        assert!(matches!(err, OrderError::UnknownProduct(id) if id == ghost));
        assert!(h.orders.list(None).await.unwrap().is_empty());

        let order = h.place(None, &[(robe, 1)]).await.unwrap();
        assert_eq!(order.invoice_number.as_str(), "INV-2503-0001");
    }

    #[tokio::test]
    async fn test_client_total_is_checked() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;

        let mut wrong = input(None, &[(robe, 2)]);
        wrong.total_amount = Some(Decimal::new(1000, 2));
        let err = h.create_order().execute(wrong).await.unwrap_err();
        assert!(matches!(
            err,
            OrderError::TotalMismatch { expected, provided }
                if expected == Decimal::new(9980, 2) && provided == Decimal::new(1000, 2)
        ));

        // Float rounding on the client side stays inside the tolerance
        let mut close = input(None, &[(robe, 2)]);
        close.total_amount = Some(Decimal::new(99_805, 3));
        let order = h.create_order().execute(close).await.unwrap();
        assert_eq!(order.total_amount, Decimal::new(9980, 2));
    }

    #[tokio::test]
    async fn test_item_validation() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;

        let cases: Vec<(Vec<(ProductId, i64)>, &str)> = vec![
            (vec![], "Order must contain at least one product"),
            (vec![(robe, 0)], "Quantity must be at least 1"),
            (vec![(robe, -2)], "Quantity must be at least 1"),
            (vec![(robe, 1001)], "Quantity cannot exceed 1000"),
        ];
        for (items, message) in cases {
            let err = h.place(None, &items).await.unwrap_err();
            assert!(
                matches!(err, OrderError::Validation(ref m) if m == message),
                "{err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_shipping_address_validation() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;

        let mut missing = input(None, &[(robe, 1)]);
        missing.shipping_address = None;
        let err = h.create_order().execute(missing).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(ref m) if m == "Shipping address is required"));

        let mut incomplete = input(None, &[(robe, 1)]);
        if let Some(address) = incomplete.shipping_address.as_mut() {
            address.postal_code = "   ".to_string();
        }
        let err = h.create_order().execute(incomplete).await.unwrap_err();
        assert!(matches!(
            err,
            OrderError::Validation(ref m) if m == "Shipping address is incomplete: postal code is required"
        ));
    }
}

#[cfg(test)]
mod update_order_tests {
    use chrono::Duration;
    use kernel::id::OrderId;

    use super::support::*;
    use crate::application::{ListOrdersUseCase, UpdateOrderUseCase};
    use crate::domain::value_object::{order_status::OrderStatus, payment_status::PaymentStatus};
    use crate::error::OrderError;

    #[tokio::test]
    async fn test_status_and_payment_updates() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;
        let order = h.place(None, &[(robe, 1)]).await.unwrap();

        h.clock.advance(Duration::hours(2));
        let updates = UpdateOrderUseCase::new(h.orders.clone(), h.clock());
        let shipped = updates
            .update_status(&order.order_id, OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(shipped.updated_at, order.created_at + Duration::hours(2));

        let paid = updates
            .update_payment_status(&order.order_id, PaymentStatus::Completed)
            .await
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Completed);

        let stored = ListOrdersUseCase::new(h.orders.clone())
            .get(&order.order_id)
            .await
            .unwrap();
        assert_eq!(stored.status, OrderStatus::Shipped);
        assert_eq!(stored.payment_status, PaymentStatus::Completed);
        assert_eq!(stored.invoice_number, order.invoice_number);
    }

    #[tokio::test]
    async fn test_concurrent_status_and_payment_updates_both_stick() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;
        let order = h.place(None, &[(robe, 1)]).await.unwrap();
        let updates = UpdateOrderUseCase::new(h.orders.clone(), h.clock());

        let (shipped, paid) = tokio::join!(
            updates.update_status(&order.order_id, OrderStatus::Shipped),
            updates.update_payment_status(&order.order_id, PaymentStatus::Completed),
        );
        shipped.unwrap();
        paid.unwrap();

        let stored = ListOrdersUseCase::new(h.orders.clone())
            .get(&order.order_id)
            .await
            .unwrap();
        assert_eq!(stored.status, OrderStatus::Shipped);
        assert_eq!(stored.payment_status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn test_any_status_may_follow_any_other() {
        let h = Harness::new();
        let robe = h.product("Robe Lin", 4990).await;
        let order = h.place(None, &[(robe, 1)]).await.unwrap();
        let updates = UpdateOrderUseCase::new(h.orders.clone(), h.clock());

        for status in [OrderStatus::Cancelled, OrderStatus::Pending, OrderStatus::Delivered] {
            let updated = updates.update_status(&order.order_id, status).await.unwrap();
            assert_eq!(updated.status, status);
        }
    }

    #[tokio::test]
    async fn test_missing_order() {
        let h = Harness::new();
        let updates = UpdateOrderUseCase::new(h.orders.clone(), h.clock());
        let err = updates
            .update_status(&OrderId::new(), OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::OrderNotFound));
    }
}

#[cfg(test)]
mod router_tests {
    use auth::domain::value_object::user_role::UserRole;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::presentation::router::{
        admin_orders_router, admin_products_router, orders_router, products_router,
    };

    fn app(h: &Harness) -> Router {
        Router::new()
            .nest("/orders", orders_router(h.state()))
            .nest("/admin/orders", admin_orders_router(h.state()))
            .nest("/products", products_router(h.state()))
            .nest("/admin/products", admin_products_router(h.state()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn order_body(product: &str, quantity: i64) -> Value {
        json!({
            "products": [{ "product": product, "quantity": quantity }],
            "shippingAddress": {
                "street": "12 rue des Lilas",
                "city": "Lyon",
                "state": "Rhône",
                "postalCode": "69003",
                "country": "France"
            }
        })
    }

    #[tokio::test]
    async fn test_guest_checkout() {
        let h = Harness::new();
        let app = app(&h);
        let robe = h.product("Robe Lin", 4990).await.to_string();

        let (status, body) = send(&app, json_request("POST", "/orders", None, order_body(&robe, 2))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["user"].is_null());
        assert_eq!(body["invoiceNumber"], "INV-2503-0001");
        assert_eq!(body["totalAmount"], 99.8);
        assert_eq!(body["products"][0]["price"], 49.9);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["paymentStatus"], "pending");
        assert_eq!(body["shippingAddress"]["postalCode"], "69003");
    }

    #[tokio::test]
    async fn test_owner_comes_from_the_token() {
        let h = Harness::new();
        let app = app(&h);
        let robe = h.product("Robe Lin", 4990).await.to_string();
        let (user_id, token) = h.account("camille@example.com", UserRole::User).await;

        let mut body = order_body(&robe, 1);
        body["user"] = json!("00000000-0000-0000-0000-000000000000");
        let (status, body) = send(&app, json_request("POST", "/orders", Some(&token), body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"], user_id.to_string());

        let (status, _) = send(
            &app,
            json_request("POST", "/orders", Some("garbage"), order_body(&robe, 1)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_order_errors() {
        let h = Harness::new();
        let app = app(&h);
        let robe = h.product("Robe Lin", 4990).await.to_string();

        let (status, body) =
            send(&app, json_request("POST", "/orders", None, order_body("not-an-id", 1))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid product id: not-an-id");

        let mut mismatch = order_body(&robe, 1);
        mismatch["totalAmount"] = json!(10);
        let (status, _) = send(&app, json_request("POST", "/orders", None, mismatch)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            json_request("POST", "/orders", None, json!({ "products": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Order must contain at least one product");
    }

    #[tokio::test]
    async fn test_my_orders() {
        let h = Harness::new();
        let app = app(&h);
        let robe = h.product("Robe Lin", 4990).await;
        let (camille, token) = h.account("camille@example.com", UserRole::User).await;
        let (other, _) = h.account("jules@example.com", UserRole::User).await;

        h.place(Some(camille), &[(robe, 1)]).await.unwrap();
        h.place(Some(other), &[(robe, 1)]).await.unwrap();
        h.place(None, &[(robe, 1)]).await.unwrap();

        let (status, _) = send(&app, get("/orders/mine", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, get("/orders/mine", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let orders = body.as_array().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["user"], camille.to_string());
    }

    #[tokio::test]
    async fn test_admin_order_routes() {
        let h = Harness::new();
        let app = app(&h);
        let robe = h.product("Robe Lin", 4990).await;
        let (camille, user_token) = h.account("camille@example.com", UserRole::User).await;
        let (_, admin_token) = h.account("admin@example.com", UserRole::Admin).await;
        let order = h.place(Some(camille), &[(robe, 1)]).await.unwrap();
        h.place(None, &[(robe, 1)]).await.unwrap();

        let (status, _) = send(&app, get("/admin/orders", Some(&user_token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, get("/admin/orders", Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let uri = format!("/admin/orders?userId={camille}");
        let (_, body) = send(&app, get(&uri, Some(&admin_token))).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let uri = format!("/admin/orders/{}", order.order_id);
        let (status, body) = send(&app, get(&uri, Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["invoiceNumber"], "INV-2503-0001");

        let (status, _) = send(&app, get("/admin/orders/nope", Some(&admin_token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/admin/orders/{}/status", order.order_id);
        let (status, body) = send(
            &app,
            json_request("PATCH", &uri, Some(&admin_token), json!({ "status": "shipped" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "shipped");

        let (status, _) = send(
            &app,
            json_request("PATCH", &uri, Some(&admin_token), json!({ "status": "lost" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/admin/orders/{}/payment-status", order.order_id);
        let (status, body) = send(
            &app,
            json_request("PATCH", &uri, Some(&admin_token), json!({ "paymentStatus": "completed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["paymentStatus"], "completed");
        assert_eq!(body["status"], "shipped");
    }

    #[tokio::test]
    async fn test_product_routes() {
        let h = Harness::new();
        let app = app(&h);
        let (_, user_token) = h.account("camille@example.com", UserRole::User).await;
        let (_, admin_token) = h.account("admin@example.com", UserRole::Admin).await;
        let product = json!({
            "name": "Pantalon Large",
            "description": "Pantalon fluide",
            "price": 59.9,
            "stock": 4,
            "category": "pantalons",
            "sizes": ["38", "40"],
            "colors": ["sable"],
            "categories": { "style": ["casual"], "type": ["large"] }
        });

        let (status, _) = send(
            &app,
            json_request("POST", "/admin/products", Some(&user_token), product.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, created) = send(
            &app,
            json_request("POST", "/admin/products", Some(&admin_token), product),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["price"], 59.9);
        assert_eq!(created["categories"]["type"][0], "large");

        let uri = format!("/products/{}", created["id"].as_str().unwrap());
        let (status, body) = send(&app, get(&uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Pantalon Large");

        let (status, _) = send(&app, get("/products/nope", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, get("/admin/products", Some(&admin_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/admin/products",
                Some(&admin_token),
                json!({ "name": "X", "description": "Y", "price": 0, "stock": 1, "category": "robes" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_public_catalog_and_product_edits() {
        let h = Harness::new();
        let app = app(&h);
        let (_, user_token) = h.account("camille@example.com", UserRole::User).await;
        let (_, admin_token) = h.account("admin@example.com", UserRole::Admin).await;
        let robe = h.product("Robe Lin", 4990).await;
        h.clock.advance(chrono::Duration::minutes(1));
        let foulard = h.product("Foulard", 1250).await;

        // Browsing needs no token, newest first
        let (status, body) = send(&app, get("/products", None)).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Foulard", "Robe Lin"]);

        let edit = json!({
            "name": "Robe Lin Soldée",
            "description": "Robe d'été en lin",
            "price": 39.9,
            "stock": 3,
            "category": "robes"
        });
        let uri = format!("/admin/products/{robe}");

        let (status, _) = send(&app, json_request("PUT", &uri, Some(&user_token), edit.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, json_request("PUT", &uri, Some(&admin_token), edit)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], robe.to_string());
        assert_eq!(body["name"], "Robe Lin Soldée");
        assert_eq!(body["price"], 39.9);

        // New orders pick up the edited price
        let order = h.place(None, &[(robe, 1)]).await.unwrap();
        assert_eq!(order.total_amount, rust_decimal::Decimal::new(3990, 2));

        let (status, _) = send(
            &app,
            json_request(
                "PUT",
                &uri,
                Some(&admin_token),
                json!({ "name": "Robe", "description": "Lin", "price": -1, "stock": 1, "category": "robes" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let delete = |token: &str, id: String| {
            Request::delete(format!("/admin/products/{id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap()
        };

        let (status, body) = send(&app, delete(&admin_token, foulard.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Product deleted");

        let (status, _) = send(&app, get(&format!("/products/{foulard}"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, delete(&admin_token, foulard.to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, delete(&user_token, robe.to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, get("/products", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
