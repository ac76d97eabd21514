use anyhow::{bail, Context, Error};
use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

/// Command line client for the order server
#[derive(Parser, Debug)]
#[command(name = "order-client")]
#[command(about = "client cli used to place orders and browse restaurant menus", version, long_about = None
)]
struct Cli {
    /// server base url
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    host: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// order related ops
    #[command(arg_required_else_help = true)]
    Order(OrderArgs),
    /// fetch a restaurant's menu
    #[command(arg_required_else_help = true)]
    Menu(MenuArgs),
}

#[derive(Debug, Args)]
struct OrderArgs {
    #[command(subcommand)]
    command: OrderCmds,
}

#[derive(Debug, Subcommand)]
enum OrderCmds {
    #[command(arg_required_else_help = true)]
    Create {
        #[arg(long = "food", help = "Food to order, as id:name:price:quantity", value_name = "FOOD", value_parser = parse_food, num_args = 1..)]
        foods: Vec<Value>,
    },
    #[command(arg_required_else_help = true)]
    Get {
        #[arg(help = "Order id returned by create", value_name = "ORDER_ID")]
        id: String,
    },
}

#[derive(Debug, Args)]
struct MenuArgs {
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,
    #[arg(long = "restaurant", value_name = "RESTAURANT_ID")]
    restaurant_id: String,
}

fn parse_food(s: &str) -> Result<Value, String> {
    let parts: Vec<&str> = s.splitn(4, ':').collect();
    let [id, name, price, quantity] = parts.as_slice() else {
        return Err(format!("expected id:name:price:quantity, got {s}"));
    };
    let price: f64 = price.parse().map_err(|e| format!("invalid price {price}, {e}"))?;
    let quantity: u32 = quantity.parse().map_err(|e| format!("invalid quantity {quantity}, {e}"))?;
    Ok(json!({"id": id, "name": name, "price": price, "quantity": quantity}))
}

async fn print_response(res: Response) -> Result<(), Error> {
    let status = res.status();
    let body: Value = res.json().await.context("server returned a non json body")?;
    match status {
        StatusCode::OK | StatusCode::CREATED => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        StatusCode::NOT_FOUND => bail!("not found: {}", body["detail"]),
        unexpected => bail!("got unexpected status code {}, {}", unexpected, body["detail"]),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Cli::parse();
    let client = Client::new();

    let res = match args.command {
        Commands::Order(order) => match order.command {
            OrderCmds::Create { foods } => {
                println!("placing an order of {} foods", foods.len());
                client
                    .post(format!("{}/create_order/", args.host))
                    .json(&json!({ "foods": foods }))
                    .send()
                    .await?
            }
            OrderCmds::Get { id } => {
                client
                    .get(format!("{}/get_order/{}", args.host, id))
                    .send()
                    .await?
            }
        },
        Commands::Menu(menu) => {
            client
                .post(format!("{}/restaurant-menu/", args.host))
                .json(&json!({
                    "latitude": menu.lat,
                    "longitude": menu.lng,
                    "restaurant_id": menu.restaurant_id,
                }))
                .send()
                .await?
        }
    };
    print_response(res).await
}
