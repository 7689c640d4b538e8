//! # Interactive Shell
//!
//! Menu loop, input parsing, dispatch, and tabular console output.
//!
//! ## Behavior
//! - Reads one bounded integer menu choice per iteration
//! - Invalid input (non-integer, out of range) reprints the prompt with
//!   no side effects
//! - Exactly one operation runs per selection, to completion, before the
//!   next prompt (single-threaded, blocking)
//! - Every operation error is printed and the loop continues; nothing
//!   after startup crashes the process
//! - EOF on stdin is treated as exit

use std::io::{self, BufRead, Write};

use store_core::{validation, Money};
use store_db::{Database, DbError, OrderError};

/// The interactive menu shell. Owns the database handle for the lifetime
/// of the session.
pub struct Shell {
    db: Database,
}

impl Shell {
    pub fn new(db: Database) -> Self {
        Shell { db }
    }

    /// Runs the menu loop until the exit selection (or EOF).
    pub async fn run(&self) {
        loop {
            print_menu();
            let Some(choice) = self.read_int("Choose an option: ") else {
                return;
            };

            match choice {
                1 => self.view_customers().await,
                2 => self.insert_customer().await,
                3 => self.update_customer_email().await,
                4 => self.view_products().await,
                5 => self.update_product_price().await,
                6 => self.view_orders().await,
                7 => self.place_order().await,
                8 => self.view_order_summary().await,
                9 => self.add_order_item().await,
                0 => return,
                _ => println!("Invalid choice. Try again."),
            }
        }
    }

    // =========================================================================
    // Input helpers
    // =========================================================================

    /// Prompts and reads one trimmed line. Returns None on EOF.
    fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(_) => None,
        }
    }

    /// Prompts until a valid integer is entered. Returns None on EOF.
    fn read_int(&self, prompt: &str) -> Option<i64> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<i64>() {
                Ok(value) => return Some(value),
                Err(_) => println!("Please enter a valid integer."),
            }
        }
    }

    /// Prompts until a valid decimal amount is entered. Returns None on EOF.
    fn read_money(&self, prompt: &str) -> Option<Money> {
        loop {
            let line = self.read_line(prompt)?;
            match Money::parse(&line) {
                Ok(value) => return Some(value),
                Err(e) => println!("{e}"),
            }
        }
    }

    /// Prompts until the input passes the given validator. Returns None on EOF.
    fn read_validated(
        &self,
        prompt: &str,
        validate: fn(&str) -> Result<(), store_core::ValidationError>,
    ) -> Option<String> {
        loop {
            let line = self.read_line(prompt)?;
            match validate(&line) {
                Ok(()) => return Some(line),
                Err(e) => println!("{e}"),
            }
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    async fn view_customers(&self) {
        match self.db.customers().list().await {
            Ok(customers) => {
                println!("\n-- Customers --");
                for c in customers {
                    println!("{} | {} | {} | {}", c.id, c.name, c.email, c.address);
                }
            }
            Err(e) => report("Error viewing customers", &e),
        }
    }

    async fn insert_customer(&self) {
        let Some(name) = self.read_validated("Customer name: ", validation::validate_name) else {
            return;
        };
        let Some(email) = self.read_validated("Email: ", validation::validate_email) else {
            return;
        };
        let Some(address) = self.read_validated("Address: ", validation::validate_address) else {
            return;
        };

        match self.db.customers().insert(&name, &email, &address).await {
            Ok(id) => println!("Created customer {id}."),
            Err(e @ DbError::UniqueViolation { .. }) => {
                report("Error inserting customer (duplicate email?)", &e)
            }
            Err(e) => report("Error inserting customer", &e),
        }
    }

    async fn update_customer_email(&self) {
        let Some(id) = self.read_int("Customer ID to update: ") else {
            return;
        };
        let Some(email) = self.read_validated("New email: ", validation::validate_email) else {
            return;
        };

        match self.db.customers().update_email(id, &email).await {
            Ok(()) => println!("Updated email for customer {id}."),
            Err(DbError::NotFound { .. }) => println!("No customer found with ID {id}."),
            Err(e) => report("Error updating customer email", &e),
        }
    }

    async fn view_products(&self) {
        match self.db.products().list().await {
            Ok(products) => {
                println!("\n-- Products --");
                for p in products {
                    println!(
                        "{} | {} | {} | stock={} | category={}",
                        p.id,
                        p.name,
                        p.price(),
                        p.stock_qty,
                        p.category_name
                    );
                }
            }
            Err(e) => report("Error viewing products", &e),
        }
    }

    async fn update_product_price(&self) {
        let Some(id) = self.read_int("Product ID to update: ") else {
            return;
        };
        let Some(price) = self.read_money("New price: ") else {
            return;
        };
        if let Err(e) = validation::validate_price(price) {
            println!("{e}");
            return;
        }

        match self.db.products().update_price(id, price).await {
            Ok(()) => println!("Updated price for product {id}."),
            Err(DbError::NotFound { .. }) => println!("No product found with ID {id}."),
            Err(e) => report("Error updating product price", &e),
        }
    }

    async fn view_orders(&self) {
        match self.db.orders().list().await {
            Ok(orders) => {
                println!("\n-- Orders --");
                for o in orders {
                    println!(
                        "{} | {} | customer={} | {} | status={}",
                        o.id,
                        o.placed_at.format("%Y-%m-%d %H:%M:%S"),
                        o.customer_name,
                        o.total(),
                        o.status
                    );
                }
            }
            Err(e) => report("Error viewing orders", &e),
        }
    }

    async fn place_order(&self) {
        println!("\n-- Place Order --");

        let Some(customer_id) = self.read_int("Customer ID: ") else {
            return;
        };
        let Some(product_id) = self.read_int("Product ID: ") else {
            return;
        };
        let Some(quantity) = self.read_int("Quantity: ") else {
            return;
        };
        // Prompt-side sanity check; the transaction re-validates against
        // live stock inside its own scope.
        if let Err(e) = validation::validate_quantity(quantity) {
            println!("{e}");
            return;
        }

        match self
            .db
            .placement()
            .place_order(customer_id, product_id, quantity)
            .await
        {
            Ok(order_id) => {
                println!("Order {order_id} created successfully.");
                println!("Committed order, line item, stock update, and ledger entry.");
            }
            Err(e @ OrderError::Storage(_)) => report("Transaction failed, rolled back", &e),
            Err(e) => println!("Transaction failed, rolled back: {e}"),
        }
    }

    async fn view_order_summary(&self) {
        match self.db.orders().order_summary().await {
            Ok(rows) => {
                println!("\n-- Order Summary Report --");
                for r in rows {
                    println!(
                        "order {} | customer={} | items={} | total={}",
                        r.order_id,
                        r.customer_name,
                        r.total_items,
                        r.total_amount()
                    );
                }
            }
            Err(e) => report("Error reading order_summary view", &e),
        }
    }

    async fn add_order_item(&self) {
        let Some(order_id) = self.read_int("Order ID: ") else {
            return;
        };
        let Some(product_id) = self.read_int("Product ID: ") else {
            return;
        };
        let Some(quantity) = self.read_int("Quantity: ") else {
            return;
        };
        if let Err(e) = validation::validate_quantity(quantity) {
            println!("{e}");
            return;
        }

        match self
            .db
            .orders()
            .add_order_item(order_id, product_id, quantity)
            .await
        {
            Ok(()) => println!("Added item to order {order_id}."),
            Err(DbError::NotFound { entity, id }) => println!("{entity} {id} not found."),
            Err(e) => report("Error adding order item", &e),
        }
    }
}

fn print_menu() {
    println!("\n=== Online Store Menu ===");
    println!("1. View Customers");
    println!("2. Insert Customer");
    println!("3. Update Customer Email");
    println!("4. View Products");
    println!("5. Update Product Price");
    println!("6. View Orders");
    println!("7. Place Order (atomic transaction)");
    println!("8. View Order Summary Report");
    println!("9. Add Order Item");
    println!("0. Exit");
}

/// Prints an operation failure. The error's Display already carries the
/// vendor error code where the driver reported one.
fn report(context: &str, err: &dyn std::error::Error) {
    eprintln!("{context}: {err}");
}
