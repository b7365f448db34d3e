// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2

const GUTTER: usize = 45;

#[allow(dead_code)]
pub fn generate_dump(panels: usize) -> String {
    let prefix = format!("│{}│", " ".repeat(GUTTER));
    let row = |body: &str| format!("{prefix}{body:<45}│\n");

    let mut dump = String::new();
    dump.push_str("┌───────────────────────────────┐\n");
    dump.push_str("│ Integration Queue Monitor     │\n");
    dump.push_str("├───────────────────────────────┤\n");
    dump.push_str(&row(" {"));

    for panel in 0..panels {
        dump.push_str(&row(&format!("   \"TABLE_{panel}\": {{")));
        dump.push_str(&row(&format!("     \"Batch Queue Id\": {panel},")));
        dump.push_str(&row(&format!("     \"Total Batches Created\": {},", panel * 3)));
        dump.push_str(&row("     \"Avg Event Count Per Batch\": 12.5,"));
        dump.push_str(&row(
            "     \"Last Successful Merge Time\": \"2024-03-01T08:15:30Z\",",
        ));
        dump.push_str(&row("     \"Last Batch Info\": {"));
        dump.push_str(&row("       \"Batch Event Count\": 17,"));
        dump.push_str(&row("       \"Integration Task Time\": {"));
        dump.push_str(&row("         \"Merge Time In Ms\": 40"));
        dump.push_str(&row("       }"));
        dump.push_str(&row("     }"));
        dump.push_str(&row("   },"));
        if panel % 10 == 0 {
            dump.push('\n');
        }
    }

    dump.push_str(&row(" }"));
    dump.push_str("└───────────────────────────────┘\n");
    dump
}
