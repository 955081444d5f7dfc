//! Fixed dataset used to populate a development database.

use chrono::NaiveDate;
use uuid::{Uuid, uuid};

use crate::{
    dtos::user::UserCreateRequest,
    models::{customer::Customer, invoice::Invoice, revenue::Revenue},
};

const EVIL_RABBIT: Uuid = uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa");
const DELBA_DE_OLIVEIRA: Uuid = uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a");
const LEE_ROBINSON: Uuid = uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a");
const MICHAEL_NOVOTNY: Uuid = uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2");
const AMY_BURNS: Uuid = uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9");
const BALAZS_ORBAN: Uuid = uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb");

const USERS: [(Uuid, &str, &str, &str); 1] = [(
    uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
    "User",
    "user@nextmail.com",
    "123456",
)];

const CUSTOMERS: [(Uuid, &str, &str, &str); 6] = [
    (EVIL_RABBIT, "Evil Rabbit", "evil@rabbit.com", "/customers/evil-rabbit.png"),
    (DELBA_DE_OLIVEIRA, "Delba de Oliveira", "delba@oliveira.com", "/customers/delba-de-oliveira.png"),
    (LEE_ROBINSON, "Lee Robinson", "lee@robinson.com", "/customers/lee-robinson.png"),
    (MICHAEL_NOVOTNY, "Michael Novotny", "michael@novotny.com", "/customers/michael-novotny.png"),
    (AMY_BURNS, "Amy Burns", "amy@burns.com", "/customers/amy-burns.png"),
    (BALAZS_ORBAN, "Balazs Orban", "balazs@orban.com", "/customers/balazs-orban.png"),
];

const INVOICES: [(Uuid, i32, &str, NaiveDate); 13] = [
    (EVIL_RABBIT, 15795, "pending", date(2022, 12, 6)),
    (DELBA_DE_OLIVEIRA, 20348, "pending", date(2022, 11, 14)),
    (AMY_BURNS, 3040, "paid", date(2022, 10, 29)),
    (MICHAEL_NOVOTNY, 44800, "paid", date(2023, 9, 10)),
    (BALAZS_ORBAN, 34577, "pending", date(2023, 8, 5)),
    (LEE_ROBINSON, 54246, "pending", date(2023, 7, 16)),
    (EVIL_RABBIT, 666, "pending", date(2023, 6, 27)),
    (MICHAEL_NOVOTNY, 32545, "paid", date(2023, 6, 9)),
    (AMY_BURNS, 1250, "paid", date(2023, 6, 17)),
    (BALAZS_ORBAN, 8546, "paid", date(2023, 6, 7)),
    (DELBA_DE_OLIVEIRA, 500, "paid", date(2023, 8, 19)),
    (BALAZS_ORBAN, 8945, "paid", date(2023, 6, 3)),
    (LEE_ROBINSON, 1000, "paid", date(2022, 6, 5)),
];

const REVENUE: [(&str, i32); 12] = [
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

/// Stable id of the `index`-th seeded invoice, so re-seeding hits the same rows.
pub fn invoice_id(index: usize, customer_id: Uuid, amount: i32, date: NaiveDate) -> Uuid {
    let key = format!("invoice:{}:{}:{}:{}", index, customer_id, amount, date);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes())
}

pub fn users() -> Vec<UserCreateRequest> {
    USERS
        .iter()
        .map(|&(id, name, email, password)| UserCreateRequest {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .collect()
}

pub fn customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|&(id, name, email, image_url)| Customer {
            id,
            name: name.to_string(),
            email: email.to_string(),
            image_url: image_url.to_string(),
        })
        .collect()
}

pub fn invoices() -> Vec<Invoice> {
    INVOICES
        .iter()
        .enumerate()
        .map(|(index, &(customer_id, amount, status, date))| Invoice {
            id: invoice_id(index, customer_id, amount, date),
            customer_id,
            amount,
            status: status.to_string(),
            date,
        })
        .collect()
}

pub fn revenue() -> Vec<Revenue> {
    REVENUE
        .iter()
        .map(|&(month, revenue)| Revenue {
            month: month.to_string(),
            revenue,
        })
        .collect()
}
