//! Demo command: the classic two-process circular wait.

use ragsim_core::AllocationGraph;

use crate::colors;

/// Build the textbook deadlock in-process and print what the detector sees.
pub fn execute() -> anyhow::Result<()> {
    let mut graph = AllocationGraph::new();

    println!(
        "\n{}ragsim demo{} - two-process circular wait",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    let p1 = graph.add_process();
    let p2 = graph.add_process();
    let r1 = graph.add_resource();
    let r2 = graph.add_resource();
    println!(
        "{}  ◆ Nodes:{} {}, {}, {}, {}",
        colors::CYAN,
        colors::RESET,
        p1,
        p2,
        r1,
        r2
    );

    graph.add_allocation(&r1, &p1)?;
    graph.add_allocation(&r2, &p2)?;
    println!(
        "{}  ◆ Held:{} {} -> {}, {} -> {}",
        colors::CYAN,
        colors::RESET,
        r1,
        p1,
        r2,
        p2
    );

    graph.add_request(&p1, &r2)?;
    graph.add_request(&p2, &r1)?;
    println!(
        "{}  ◆ Waiting:{} {} -> {}, {} -> {}",
        colors::CYAN,
        colors::RESET,
        p1,
        r2,
        p2,
        r1
    );
    println!("{}", "─".repeat(50));

    println!("{}Graph:{}", colors::DIM, colors::RESET);
    println!("{}", serde_json::to_string_pretty(&graph.snapshot())?);

    let cycles = graph.find_deadlocks();
    if cycles.is_empty() {
        println!("{}No deadlock detected{}", colors::GREEN, colors::RESET);
    } else {
        println!(
            "{}Deadlock:{} {}",
            colors::RED,
            colors::RESET,
            serde_json::to_string(&cycles)?
        );
    }

    Ok(())
}
