//! Interactive prompt sequence and console reporting.
//!
//! Mirrors the CLI subcommands as a numbered menu for use without flags.
//! All input is read line by line from stdin; every action runs to
//! completion before the menu is shown again.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::binance::{AssetBalance, OrderResponse, Position};
use crate::domain::{OrderSide, OrderType, Symbol, TimeInForce};
use crate::trader::Trader;

/// Run the interactive menu until the user exits.
pub async fn run(trader: &Trader) -> anyhow::Result<()> {
    println!("futures-trader interactive mode");

    loop {
        println!();
        println!("1. Place market order");
        println!("2. Place limit order");
        println!("3. Place stop-limit order");
        println!("4. Order status");
        println!("5. Cancel order");
        println!("6. Open orders");
        println!("7. Account balance");
        println!("8. Position");
        println!("9. Close positions");
        println!("0. Exit");

        let choice = prompt("Select an option (0-9): ")?;
        match choice.as_str() {
            "0" => break,
            "1" => place_order(trader, OrderType::Market).await?,
            "2" => place_order(trader, OrderType::Limit).await?,
            "3" => place_order(trader, OrderType::StopLimit).await?,
            "4" => order_status(trader).await?,
            "5" => cancel_order(trader).await?,
            "6" => open_orders(trader).await?,
            "7" => balance(trader).await?,
            "8" => position(trader).await?,
            "9" => close_positions(trader).await?,
            other => println!("Invalid choice: {other}"),
        }
    }

    Ok(())
}

/// Prompt-driven order placement for one order type.
async fn place_order(trader: &Trader, order_type: OrderType) -> anyhow::Result<()> {
    println!();
    println!("Place {order_type} order");

    let symbol = Symbol::new(&prompt("Symbol (e.g. BTCUSDT): ")?);

    let side = match parse_side(&prompt("Side (BUY/SELL): ")?) {
        Some(side) => side,
        None => {
            println!("Invalid side, must be BUY or SELL");
            return Ok(());
        }
    };

    let Some(quantity) = read_decimal("Quantity: ")? else {
        return Ok(());
    };

    let price = if order_type == OrderType::Market {
        None
    } else {
        match read_decimal("Price: ")? {
            Some(price) => Some(price),
            None => return Ok(()),
        }
    };

    let stop_price = if order_type == OrderType::StopLimit {
        match read_decimal("Stop price: ")? {
            Some(stop) => Some(stop),
            None => return Ok(()),
        }
    } else {
        None
    };

    let reduce_only = confirm("Reduce only? (y/N): ")?;

    let result = match order_type {
        OrderType::Market => {
            trader
                .place_market_order(symbol, side, quantity, reduce_only)
                .await
        }
        OrderType::Limit => {
            trader
                .place_limit_order(
                    symbol,
                    side,
                    quantity,
                    price.unwrap_or_default(),
                    TimeInForce::Gtc,
                    reduce_only,
                )
                .await
        }
        OrderType::StopLimit => {
            trader
                .place_stop_limit_order(
                    symbol,
                    side,
                    quantity,
                    price.unwrap_or_default(),
                    stop_price.unwrap_or_default(),
                    TimeInForce::Gtc,
                    reduce_only,
                )
                .await
        }
    };

    match result {
        Ok(response) => {
            println!("Order placed.");
            print_order(&response);
        }
        Err(e) => println!("Order failed: {e}"),
    }
    Ok(())
}

async fn order_status(trader: &Trader) -> anyhow::Result<()> {
    let symbol = Symbol::new(&prompt("Symbol: ")?);
    let Some(order_id) = read_parsed::<i64>("Order ID: ")? else {
        return Ok(());
    };

    match trader.order_status(&symbol, order_id).await {
        Ok(response) => print_order(&response),
        Err(e) => println!("Status lookup failed: {e}"),
    }
    Ok(())
}

async fn cancel_order(trader: &Trader) -> anyhow::Result<()> {
    let symbol = Symbol::new(&prompt("Symbol: ")?);
    let Some(order_id) = read_parsed::<i64>("Order ID: ")? else {
        return Ok(());
    };

    if !confirm(&format!("Cancel order {order_id}? (y/N): "))? {
        println!("Cancellation aborted");
        return Ok(());
    }

    match trader.cancel_order(&symbol, order_id).await {
        Ok(_) => println!("Order {order_id} canceled"),
        Err(e) => println!("Cancel failed: {e}"),
    }
    Ok(())
}

async fn open_orders(trader: &Trader) -> anyhow::Result<()> {
    let input = prompt("Symbol (leave empty for all): ")?;
    let symbol = (!input.is_empty()).then(|| Symbol::new(&input));

    match trader.open_orders(symbol.as_ref()).await {
        Ok(orders) => print_open_orders(&orders),
        Err(e) => println!("Failed to fetch open orders: {e}"),
    }
    Ok(())
}

async fn balance(trader: &Trader) -> anyhow::Result<()> {
    match trader.account_balances().await {
        Ok(balances) => print_balances(&balances),
        Err(e) => println!("Failed to fetch balance: {e}"),
    }
    Ok(())
}

async fn position(trader: &Trader) -> anyhow::Result<()> {
    let symbol = Symbol::new(&prompt("Symbol: ")?);
    match trader.position(&symbol).await {
        Ok(Some(position)) => print_position(&position),
        Ok(None) => println!("No open position for {symbol}"),
        Err(e) => println!("Failed to fetch position: {e}"),
    }
    Ok(())
}

async fn close_positions(trader: &Trader) -> anyhow::Result<()> {
    let input = prompt("Symbol (leave empty for all): ")?;
    let symbol = (!input.is_empty()).then(|| Symbol::new(&input));

    let scope = symbol
        .as_ref()
        .map_or_else(|| "all positions".to_string(), ToString::to_string);
    if !confirm(&format!("Close {scope}? (y/N): "))? {
        println!("Aborted");
        return Ok(());
    }

    match trader.close_all_positions(symbol.as_ref()).await {
        Ok(closed) => println!("Closed {} position(s)", closed.len()),
        Err(e) => println!("Failed to close positions: {e}"),
    }
    Ok(())
}

// ============================================================================
// Console reporting (shared with the non-interactive path)
// ============================================================================

/// Print one order acknowledgment.
pub fn print_order(order: &OrderResponse) {
    println!("Order ID:  {}", order.order_id);
    println!("Client ID: {}", order.client_order_id);
    println!("Symbol:    {}", order.symbol);
    println!("Side:      {}", order.side);
    println!("Type:      {}", order.order_type);
    println!("Status:    {}", order.status);
    println!("Quantity:  {}", order.orig_qty.normalize());
    println!("Filled:    {}", order.executed_qty.normalize());
    if !order.price.is_zero() {
        println!("Price:     {}", order.price.normalize());
    }
    if let Some(stop) = order.stop_price.filter(|s| !s.is_zero()) {
        println!("Stop:      {}", stop.normalize());
    }
}

/// Print the open order list.
pub fn print_open_orders(orders: &[OrderResponse]) {
    if orders.is_empty() {
        println!("No open orders");
        return;
    }
    for order in orders {
        println!(
            "{} {} {} {} qty={} filled={} price={} status={}",
            order.order_id,
            order.symbol,
            order.side,
            order.order_type,
            order.orig_qty.normalize(),
            order.executed_qty.normalize(),
            order.price.normalize(),
            order.status,
        );
    }
}

/// Print non-zero balances.
pub fn print_balances(balances: &[AssetBalance]) {
    if balances.is_empty() {
        println!("No balance information available");
        return;
    }
    for balance in balances {
        println!(
            "{}: {} ({} available)",
            balance.asset,
            balance.balance.normalize(),
            balance.available_balance.normalize(),
        );
    }
}

/// Print one position.
pub fn print_position(position: &Position) {
    println!("Symbol:         {}", position.symbol);
    println!("Amount:         {}", position.position_amt.normalize());
    println!("Entry price:    {}", position.entry_price.normalize());
    println!("Unrealized PnL: {}", position.unrealized_profit.normalize());
}

// ============================================================================
// Input helpers
// ============================================================================

/// Read one trimmed line from stdin after printing a label.
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt for a y/N answer.
fn confirm(label: &str) -> io::Result<bool> {
    Ok(prompt(label)?.eq_ignore_ascii_case("y"))
}

/// Prompt for a decimal; `None` (with a message) on parse failure.
fn read_decimal(label: &str) -> io::Result<Option<Decimal>> {
    read_parsed(label)
}

/// Prompt and parse; `None` (with a message) on parse failure.
fn read_parsed<T: FromStr>(label: &str) -> io::Result<Option<T>> {
    let input = prompt(label)?;
    match input.parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Invalid value: {input}");
            Ok(None)
        }
    }
}

fn parse_side(input: &str) -> Option<OrderSide> {
    match input.to_uppercase().as_str() {
        "BUY" => Some(OrderSide::Buy),
        "SELL" => Some(OrderSide::Sell),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_side_accepts_case_insensitive() {
        assert_eq!(parse_side("buy"), Some(OrderSide::Buy));
        assert_eq!(parse_side("SELL"), Some(OrderSide::Sell));
        assert_eq!(parse_side("hold"), None);
    }
}
