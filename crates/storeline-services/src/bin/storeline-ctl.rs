// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Storeline Control CLI
//!
//! CLI tool for querying the ERP backend through the domain services.
//!
//! Usage:
//!   storeline-ctl <command> [options]
//!
//! Commands:
//!   login                         Authenticate and print the user id
//!   products [--limit <n>] [--search <pattern>]
//!   product <id>
//!   orders [--limit <n>] [--state <state>]
//!   order <id>
//!   partners [--limit <n>] [--search <pattern>] [--customers]
//!   partner <id>
//!   create-partner --name <name> [--email <email>]
//!   stock [--product <id>]
//!   sales-report [--period day|week|month] [--from <date>] [--to <date>]
//!   top-products [--limit <n>] [--from <date>] [--to <date>]
//!   call <model> <method> [--args <json>] [--kwargs <json>]

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;
use storeline_rpc::{ErpClient, ErpConfig, SearchOptions};
use storeline_services::{
    Analytics, Inventory, OrderQuery, PartnerQuery, Partners, Period, ProductQuery, Products,
    SalesOrders,
};

fn print_usage() {
    eprintln!(
        r#"Usage: storeline-ctl <command> [options]

Query the ERP backend through the Storeline domain services.

COMMANDS:
    login                           Authenticate and print the user id
    products                        List or search products
    product <id>                    Show one product
    orders                          List or filter sales orders
    order <id>                      Show one sales order
    partners                        List or search partners
    partner <id>                    Show one partner
    create-partner                  Create a partner
    stock                           Show stock levels
    sales-report                    Sales totals grouped by period
    top-products                    Best sellers by revenue
    call <model> <method>           Invoke an arbitrary model method

LIST OPTIONS:
    --limit <n>                     Max results (default: 80)
    --search <pattern>              Case-insensitive name match
    --state <state>                 Order state filter (orders only)
    --customers                     Partners with sales only (partners only)

REPORT OPTIONS:
    --period <day|week|month>       Bucket size (default: month)
    --from <YYYY-MM-DD>             Range start (default: 30 days ago)
    --to <YYYY-MM-DD>               Range end (default: today)

CREATE-PARTNER OPTIONS:
    --name <name>                   Partner name (required)
    --email <email>                 Partner email

CALL OPTIONS:
    --args <json>                   Positional arguments (JSON array)
    --kwargs <json>                 Keyword arguments (JSON object)

ENVIRONMENT:
    STORELINE_ERP_URL               Server base URL (default: http://localhost:8069)
    STORELINE_ERP_DB                Database name (default: storeline)
    STORELINE_ERP_LOGIN             Login name (required)
    STORELINE_ERP_PASSWORD          Password (required)
    STORELINE_ERP_TIMEOUT_MS        Request timeout in ms (default: 30000)

EXAMPLES:
    # List the 20 most recent orders
    storeline-ctl orders --limit 20

    # Monthly revenue for the first quarter
    storeline-ctl sales-report --from 2025-01-01 --to 2025-04-01

    # Confirm an order through the escape hatch
    storeline-ctl call sale.order action_confirm --args '[[42]]'
"#
    );
}

#[derive(Debug)]
enum Command {
    Login,
    Products {
        limit: u32,
        search: Option<String>,
    },
    Product {
        id: i64,
    },
    Orders {
        limit: u32,
        state: Option<String>,
    },
    Order {
        id: i64,
    },
    Partners {
        limit: u32,
        search: Option<String>,
        customers: bool,
    },
    Partner {
        id: i64,
    },
    CreatePartner {
        name: String,
        email: Option<String>,
    },
    Stock {
        product: Option<i64>,
    },
    SalesReport {
        period: Period,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    TopProducts {
        limit: u32,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    Call {
        model: String,
        method: String,
        args: Option<String>,
        kwargs: Option<String>,
    },
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from_vec(&args)
}

fn parse_id(args: &[String]) -> Result<i64, String> {
    args.get(2)
        .ok_or("Record id required")?
        .parse()
        .map_err(|_| "Invalid record id".to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date (expected YYYY-MM-DD): {}", value))
}

fn parse_args_from_vec(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            std::process::exit(0);
        }
        "login" => Ok(Command::Login),
        "products" => {
            let mut limit: u32 = 80;
            let mut search: Option<String> = None;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--limit" => {
                        i += 1;
                        limit = args
                            .get(i)
                            .ok_or("--limit requires a number")?
                            .parse()
                            .map_err(|_| "Invalid limit")?;
                    }
                    "--search" => {
                        i += 1;
                        search = Some(args.get(i).ok_or("--search requires a pattern")?.clone());
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::Products { limit, search })
        }
        "product" => Ok(Command::Product {
            id: parse_id(args)?,
        }),
        "orders" => {
            let mut limit: u32 = 80;
            let mut state: Option<String> = None;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--limit" => {
                        i += 1;
                        limit = args
                            .get(i)
                            .ok_or("--limit requires a number")?
                            .parse()
                            .map_err(|_| "Invalid limit")?;
                    }
                    "--state" => {
                        i += 1;
                        state = Some(args.get(i).ok_or("--state requires a value")?.clone());
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::Orders { limit, state })
        }
        "order" => Ok(Command::Order {
            id: parse_id(args)?,
        }),
        "partners" => {
            let mut limit: u32 = 80;
            let mut search: Option<String> = None;
            let mut customers = false;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--limit" => {
                        i += 1;
                        limit = args
                            .get(i)
                            .ok_or("--limit requires a number")?
                            .parse()
                            .map_err(|_| "Invalid limit")?;
                    }
                    "--search" => {
                        i += 1;
                        search = Some(args.get(i).ok_or("--search requires a pattern")?.clone());
                    }
                    "--customers" => customers = true,
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::Partners {
                limit,
                search,
                customers,
            })
        }
        "partner" => Ok(Command::Partner {
            id: parse_id(args)?,
        }),
        "create-partner" => {
            let mut name: Option<String> = None;
            let mut email: Option<String> = None;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--name" => {
                        i += 1;
                        name = Some(args.get(i).ok_or("--name requires a value")?.clone());
                    }
                    "--email" => {
                        i += 1;
                        email = Some(args.get(i).ok_or("--email requires a value")?.clone());
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::CreatePartner {
                name: name.ok_or("--name is required")?,
                email,
            })
        }
        "stock" => {
            let mut product: Option<i64> = None;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--product" => {
                        i += 1;
                        product = Some(
                            args.get(i)
                                .ok_or("--product requires an id")?
                                .parse()
                                .map_err(|_| "Invalid product id")?,
                        );
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::Stock { product })
        }
        "sales-report" => {
            let mut period = Period::Month;
            let mut from: Option<NaiveDate> = None;
            let mut to: Option<NaiveDate> = None;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--period" => {
                        i += 1;
                        period = match args.get(i).ok_or("--period requires a value")?.as_str() {
                            "day" => Period::Day,
                            "week" => Period::Week,
                            "month" => Period::Month,
                            other => return Err(format!("Unknown period: {}", other)),
                        };
                    }
                    "--from" => {
                        i += 1;
                        from = Some(parse_date(args.get(i).ok_or("--from requires a date")?)?);
                    }
                    "--to" => {
                        i += 1;
                        to = Some(parse_date(args.get(i).ok_or("--to requires a date")?)?);
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::SalesReport { period, from, to })
        }
        "top-products" => {
            let mut limit: u32 = 10;
            let mut from: Option<NaiveDate> = None;
            let mut to: Option<NaiveDate> = None;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--limit" => {
                        i += 1;
                        limit = args
                            .get(i)
                            .ok_or("--limit requires a number")?
                            .parse()
                            .map_err(|_| "Invalid limit")?;
                    }
                    "--from" => {
                        i += 1;
                        from = Some(parse_date(args.get(i).ok_or("--from requires a date")?)?);
                    }
                    "--to" => {
                        i += 1;
                        to = Some(parse_date(args.get(i).ok_or("--to requires a date")?)?);
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::TopProducts { limit, from, to })
        }
        "call" => {
            let model = args.get(2).ok_or("Model name required")?.clone();
            let method = args.get(3).ok_or("Method name required")?.clone();
            let mut call_args: Option<String> = None;
            let mut kwargs: Option<String> = None;

            let mut i = 4;
            while i < args.len() {
                match args[i].as_str() {
                    "--args" => {
                        i += 1;
                        call_args = Some(args.get(i).ok_or("--args requires JSON")?.clone());
                    }
                    "--kwargs" => {
                        i += 1;
                        kwargs = Some(args.get(i).ok_or("--kwargs requires JSON")?.clone());
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::Call {
                model,
                method,
                args: call_args,
                kwargs,
            })
        }
        cmd => Err(format!("Unknown command: {}", cmd)),
    }
}

/// Resolve an optional date pair into a UTC range, defaulting to the last
/// 30 days.
fn date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let to = to
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now);
    let from = from
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|| to - Duration::days(30));
    (from, to)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|e| e.to_string())?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cmd = match parse_args() {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let config = match ErpConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match ErpClient::new(config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute_command(client, cmd).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute_command(client: Arc<ErpClient>, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Login => {
            let uid = client.authenticate().await.map_err(|e| e.to_string())?;
            println!("{}", uid);
        }

        Command::Products { limit, search } => {
            let products = Products::new(client);
            let records = match search {
                Some(pattern) => {
                    products
                        .search(
                            ProductQuery::new()
                                .with_name_contains(pattern)
                                .with_limit(limit),
                        )
                        .await
                }
                None => products.list(SearchOptions::new().with_limit(limit)).await,
            }
            .map_err(|e| e.to_string())?;
            print_json(&records)?;
        }

        Command::Product { id } => {
            let products = Products::new(client);
            match products.by_id(id).await.map_err(|e| e.to_string())? {
                Some(record) => print_json(&record)?,
                None => return Err(format!("Product not found: {}", id)),
            }
        }

        Command::Orders { limit, state } => {
            let orders = SalesOrders::new(client);
            let records = match state {
                Some(state) => {
                    orders
                        .search(OrderQuery::new().with_state(state).with_limit(limit))
                        .await
                }
                None => orders.recent(SearchOptions::new().with_limit(limit)).await,
            }
            .map_err(|e| e.to_string())?;
            print_json(&records)?;
        }

        Command::Order { id } => {
            let orders = SalesOrders::new(client);
            match orders.by_id(id).await.map_err(|e| e.to_string())? {
                Some(record) => print_json(&record)?,
                None => return Err(format!("Order not found: {}", id)),
            }
        }

        Command::Partners {
            limit,
            search,
            customers,
        } => {
            let partners = Partners::new(client);
            let records = if search.is_some() || customers {
                let mut query = PartnerQuery::new().with_limit(limit);
                if let Some(pattern) = search {
                    query = query.with_name_contains(pattern);
                }
                if customers {
                    query = query.customers_only();
                }
                partners.search(query).await
            } else {
                partners.list(SearchOptions::new().with_limit(limit)).await
            }
            .map_err(|e| e.to_string())?;
            print_json(&records)?;
        }

        Command::Partner { id } => {
            let partners = Partners::new(client);
            match partners.by_id(id).await.map_err(|e| e.to_string())? {
                Some(record) => print_json(&record)?,
                None => return Err(format!("Partner not found: {}", id)),
            }
        }

        Command::CreatePartner { name, email } => {
            let partners = Partners::new(client);
            let mut values = serde_json::Map::new();
            values.insert("name".to_string(), Value::String(name));
            if let Some(email) = email {
                values.insert("email".to_string(), Value::String(email));
            }
            let id = partners
                .create(Value::Object(values))
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", id);
        }

        Command::Stock { product } => {
            let inventory = Inventory::new(client);
            let records = match product {
                Some(id) => inventory.by_product(id).await,
                None => inventory.stock_levels(SearchOptions::default()).await,
            }
            .map_err(|e| e.to_string())?;
            print_json(&records)?;
        }

        Command::SalesReport { period, from, to } => {
            let analytics = Analytics::new(client);
            let (from, to) = date_range(from, to);
            let rows = analytics
                .sales_by_period(from, to, period)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&rows)?;
        }

        Command::TopProducts { limit, from, to } => {
            let analytics = Analytics::new(client);
            let (from, to) = date_range(from, to);
            let rows = analytics
                .top_products(from, to, limit)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&rows)?;
        }

        Command::Call {
            model,
            method,
            args,
            kwargs,
        } => {
            let positional: Vec<Value> = match args {
                Some(json) => serde_json::from_str(&json)
                    .map_err(|e| format!("Invalid --args JSON: {}", e))?,
                None => Vec::new(),
            };
            let keyword: serde_json::Map<String, Value> = match kwargs {
                Some(json) => serde_json::from_str(&json)
                    .map_err(|e| format!("Invalid --kwargs JSON: {}", e))?,
                None => serde_json::Map::new(),
            };

            let result = client
                .call_method(&model, &method, positional, keyword)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&result)?;
        }
    }

    Ok(())
}
