use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use actix_web::{App, http::StatusCode, test, web};
use api_seed::{
    misc::password::verify_password,
    services::seed::{SeedStore, Seeder},
};
use async_trait::async_trait;
use common::{
    error::{AppError, Res},
    supabase::{ApiErrorBody, RestError},
};
use db::{
    models::{customer::Customer, invoice::Invoice, revenue::Revenue, user::User},
    schema::{SEED_ORDER, TableSpec},
    seed_data,
};
use serde_json::Value;
use uuid::Uuid;

fn api_error(code: &str, message: &str) -> AppError {
    AppError::Rest(RestError::Api {
        status: 404,
        body: ApiErrorBody {
            code: Some(code.to_string()),
            message: message.to_string(),
            details: None,
            hint: None,
        },
    })
}

#[derive(Default)]
struct State {
    tables: HashSet<&'static str>,
    users: HashMap<Uuid, User>,
    customers: HashMap<Uuid, Customer>,
    invoices: HashMap<Uuid, Invoice>,
    revenue: HashMap<String, Revenue>,
    executed_sql: Vec<String>,
    upserts: Vec<&'static str>,
}

/// In-memory store mimicking a database reached over REST.
#[derive(Default)]
struct FakeStore {
    state: Mutex<State>,
    /// `create_table_if_not_exists` is not installed.
    without_create_rpc: bool,
    /// `execute_sql` rejects every statement.
    broken_sql: bool,
    failing_upserts: HashSet<&'static str>,
}

impl FakeStore {
    fn with_tables(self, tables: &[&'static str]) -> Self {
        self.state.lock().unwrap().tables.extend(tables);
        self
    }

    fn upsert_check(&self, state: &mut State, table: &'static str) -> Res<()> {
        state.upserts.push(table);
        if self.failing_upserts.contains(table) {
            return Err(AppError::Internal(format!("duplicate key in {}", table)));
        }
        if !state.tables.contains(table) {
            return Err(api_error("PGRST205", "table not found"));
        }
        Ok(())
    }

    fn counts(&self) -> (usize, usize, usize, usize) {
        let state = self.state.lock().unwrap();
        (
            state.users.len(),
            state.customers.len(),
            state.invoices.len(),
            state.revenue.len(),
        )
    }
}

#[async_trait]
impl SeedStore for FakeStore {
    async fn create_table_if_not_exists(&self, table: &TableSpec) -> Res<()> {
        if self.without_create_rpc {
            return Err(api_error(
                "PGRST202",
                "Could not find the function public.create_table_if_not_exists",
            ));
        }
        self.state.lock().unwrap().tables.insert(table.name);
        Ok(())
    }

    async fn probe_table(&self, table: &TableSpec) -> Res<()> {
        if self.state.lock().unwrap().tables.contains(table.name) {
            Ok(())
        } else {
            Err(api_error("PGRST205", "Could not find the table in the schema cache"))
        }
    }

    async fn execute_sql(&self, sql: &str) -> Res<()> {
        if self.broken_sql {
            return Err(AppError::Internal(format!("syntax error in: {}", sql)));
        }
        let mut state = self.state.lock().unwrap();
        state.executed_sql.push(sql.to_string());
        if let Some(table) = SEED_ORDER.iter().find(|t| t.create_statement() == sql) {
            state.tables.insert(table.name);
        }
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> Res<()> {
        let mut state = self.state.lock().unwrap();
        self.upsert_check(&mut state, "users")?;
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn upsert_customers(&self, customers: &[Customer]) -> Res<()> {
        let mut state = self.state.lock().unwrap();
        self.upsert_check(&mut state, "customers")?;
        for customer in customers {
            state.customers.insert(customer.id, customer.clone());
        }
        Ok(())
    }

    async fn upsert_invoices(&self, invoices: &[Invoice]) -> Res<()> {
        let mut state = self.state.lock().unwrap();
        self.upsert_check(&mut state, "invoices")?;
        if invoices.iter().any(|i| !state.customers.contains_key(&i.customer_id)) {
            return Err(AppError::Internal(
                "insert or update on table \"invoices\" violates foreign key constraint".to_string(),
            ));
        }
        for invoice in invoices {
            state.invoices.insert(invoice.id, invoice.clone());
        }
        Ok(())
    }

    async fn upsert_revenue(&self, revenue: &[Revenue]) -> Res<()> {
        let mut state = self.state.lock().unwrap();
        self.upsert_check(&mut state, "revenue")?;
        for sample in revenue {
            state.revenue.insert(sample.month.clone(), sample.clone());
        }
        Ok(())
    }
}

fn seeder(store: &Arc<FakeStore>) -> Seeder {
    Seeder::new(store.clone())
}

#[actix_web::test]
async fn seeding_twice_keeps_row_counts() {
    let store = Arc::new(FakeStore::default());
    let seeder = seeder(&store);

    seeder.seed().await.unwrap();
    let first = store.counts();
    seeder.seed().await.unwrap();

    assert_eq!(first, (1, 6, 13, 12));
    assert_eq!(store.counts(), first);
}

#[actix_web::test]
async fn stored_passwords_are_verifiable_hashes() {
    let store = Arc::new(FakeStore::default());
    seeder(&store).seed().await.unwrap();

    let state = store.state.lock().unwrap();
    for request in seed_data::users() {
        let stored = &state.users[&request.id];
        assert_ne!(stored.password, request.password);
        assert!(verify_password(&request.password, &stored.password));
    }
}

#[actix_web::test]
async fn tables_are_seeded_in_dependency_order() {
    let store = Arc::new(FakeStore::default());
    seeder(&store).seed().await.unwrap();

    let upserts = store.state.lock().unwrap().upserts.clone();
    assert_eq!(upserts, vec!["users", "customers", "invoices", "revenue"]);
}

#[actix_web::test]
async fn missing_create_function_falls_back_to_raw_sql() {
    let store = Arc::new(FakeStore {
        without_create_rpc: true,
        ..Default::default()
    });
    seeder(&store).seed().await.unwrap();

    let executed = store.state.lock().unwrap().executed_sql.clone();
    let expected: Vec<String> = SEED_ORDER.iter().map(|t| t.create_statement()).collect();
    assert_eq!(executed, expected);
    assert_eq!(store.counts(), (1, 6, 13, 12));
}

#[actix_web::test]
async fn existing_tables_are_not_recreated() {
    let store = Arc::new(
        FakeStore {
            without_create_rpc: true,
            ..Default::default()
        }
        .with_tables(&["users", "customers", "invoices", "revenue"]),
    );
    seeder(&store).seed().await.unwrap();

    assert!(store.state.lock().unwrap().executed_sql.is_empty());
    assert_eq!(store.counts(), (1, 6, 13, 12));
}

#[actix_web::test]
async fn failed_raw_create_aborts_the_run() {
    let store = Arc::new(FakeStore {
        without_create_rpc: true,
        broken_sql: true,
        ..Default::default()
    });

    let error = seeder(&store).seed().await.unwrap_err();

    assert!(!error.to_string().is_empty());
    assert_eq!(store.counts(), (0, 0, 0, 0));
}

#[actix_web::test]
async fn failed_upsert_does_not_abort_the_run() {
    let store = Arc::new(FakeStore {
        failing_upserts: HashSet::from(["customers"]),
        ..Default::default()
    });

    seeder(&store).seed().await.unwrap();

    // invoices are rejected by the foreign key, revenue still lands
    assert_eq!(store.counts(), (1, 0, 0, 12));
}

#[actix_web::test]
async fn seed_route_reports_success() {
    let store = Arc::new(FakeStore::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeder(&store)))
            .service(api_seed::mount_seed()),
    )
    .await;

    let req = test::TestRequest::get().uri("/seed").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Database seeded successfully");
}

#[actix_web::test]
async fn seed_route_reports_escaped_errors_as_500() {
    let store = Arc::new(FakeStore {
        without_create_rpc: true,
        broken_sql: true,
        ..Default::default()
    });
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(seeder(&store)))
            .service(api_seed::mount_seed()),
    )
    .await;

    let req = test::TestRequest::get().uri("/seed").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
}
