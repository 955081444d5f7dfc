/// A seeded table: its name, the column used for conflict resolution, and the
/// column list of its `CREATE TABLE` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub key_column: &'static str,
    pub definition: &'static str,
}

impl TableSpec {
    pub fn create_statement(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            self.name,
            self.definition.trim()
        )
    }

    pub fn probe_statement(&self) -> String {
        format!("SELECT {} FROM {} LIMIT 1", self.key_column, self.name)
    }
}

pub const USERS: TableSpec = TableSpec {
    name: "users",
    key_column: "id",
    definition: "id UUID DEFAULT gen_random_uuid() PRIMARY KEY, \
                 name VARCHAR(255) NOT NULL, \
                 email TEXT NOT NULL UNIQUE, \
                 password TEXT NOT NULL",
};

pub const CUSTOMERS: TableSpec = TableSpec {
    name: "customers",
    key_column: "id",
    definition: "id UUID DEFAULT gen_random_uuid() PRIMARY KEY, \
                 name VARCHAR(255) NOT NULL, \
                 email VARCHAR(255) NOT NULL, \
                 image_url VARCHAR(255) NOT NULL",
};

pub const INVOICES: TableSpec = TableSpec {
    name: "invoices",
    key_column: "id",
    definition: "id UUID DEFAULT gen_random_uuid() PRIMARY KEY, \
                 customer_id UUID NOT NULL REFERENCES customers(id), \
                 amount INT NOT NULL, \
                 status VARCHAR(255) NOT NULL, \
                 date DATE NOT NULL",
};

pub const REVENUE: TableSpec = TableSpec {
    name: "revenue",
    key_column: "month",
    definition: "month VARCHAR(4) NOT NULL UNIQUE, \
                 revenue INT NOT NULL",
};

/// Tables in the order they have to be seeded: invoices reference customers.
pub const SEED_ORDER: [TableSpec; 4] = [USERS, CUSTOMERS, INVOICES, REVENUE];
