//! Walkthrough of deduplication, call limiting, and the two stacked.
//!
//! Run with `cargo run --example walkthrough`. Limiter progress shows up as
//! `INFO` log lines between the printed results.

use call_dedup::{dedup_once, CallLimiter, Deduplicator, LimitExceeded};

fn multiply((a, b): (i64, i64)) -> i64 {
    a * b
}

fn factorial_step(
    recur: &dyn Fn(u64) -> Result<u64, LimitExceeded>,
    n: u64,
) -> Result<u64, LimitExceeded> {
    if n == 0 || n == 1 {
        Ok(1)
    } else {
        Ok(n * recur(n - 1)?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== Deduplicator ===\n");

    let mut unique_func = Deduplicator::new();
    println!("First values [1, 2, 3]: {:?}", unique_func.apply([1, 2, 3]));
    println!("Repeated values [1, 2, 4]: {:?}", unique_func.apply([1, 2, 4]));
    println!("New values [5, 6]: {:?}", unique_func.apply([5, 6]));
    println!(
        "All repeated [1, 2, 3, 4, 5, 6]: {:?}",
        unique_func.apply([1, 2, 3, 4, 5, 6])
    );

    println!("\n=== Call limiter over per-call deduplication ===\n");

    let get_unique_values = CallLimiter::builder(|values: Vec<i32>| dedup_once(values))
        .with_name("get_unique_values")
        .with_max_calls(3)
        .build()?;

    for (i, values) in [vec![1, 2, 3], vec![2, 3, 4], vec![5, 6], vec![7, 8]]
        .into_iter()
        .enumerate()
    {
        match get_unique_values.call(values) {
            Ok(unique) => println!("Call {}: {:?}", i + 1, unique),
            Err(e) => println!("Error: {}", e),
        }
    }

    println!("\n=== Call limiter on other functions ===\n");

    let limited_multiply = CallLimiter::builder(multiply)
        .with_name("multiply")
        .with_max_calls(2)
        .build()?;

    for (a, b) in [(2, 3), (4, 5), (6, 7)] {
        match limited_multiply.call((a, b)) {
            Ok(product) => println!("{} * {} = {}", a, b, product),
            Err(e) => println!("Error: {}", e),
        }
    }

    println!();

    // Every recursion level counts: factorial(3) uses 3 of the 5 calls
    let factorial = CallLimiter::builder(factorial_step)
        .with_name("factorial")
        .with_max_calls(5)
        .build_recursive()?;

    let run_factorials = || -> Result<(), LimitExceeded> {
        println!("factorial(3) = {}", factorial.call(3)?);
        println!("factorial(4) = {}", factorial.call(4)?);
        Ok(())
    };
    if let Err(e) = run_factorials() {
        println!("Error: {}", e);
    }

    println!("\n=== Independent deduplicator state ===\n");

    let mut another_unique = Deduplicator::new();
    println!("New deduplicator [1, 2]: {:?}", another_unique.apply([1, 2]));
    println!("Old deduplicator [1, 2]: {:?}", unique_func.apply([1, 2]));

    Ok(())
}
