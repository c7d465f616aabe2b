use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

// Use library instead of local modules
use warikan::{scan_receipt, CannedRecognizer, ReceiptParser, SplitSession};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("parse") => {
            let path = args
                .get(2)
                .context("usage: warikan parse <receipt.txt>")?;
            run_parse(Path::new(path))
        }
        Some("settle") => {
            let path = args
                .get(2)
                .context("usage: warikan settle <session.json> <payer>")?;
            let payer = args
                .get(3)
                .context("usage: warikan settle <session.json> <payer>")?;
            run_settle(Path::new(path), payer)
        }
        Some("demo") | None => run_demo(),
        Some(other) => {
            eprintln!("unknown command: {}", other);
            eprintln!("usage: warikan [parse <receipt.txt> | settle <session.json> <payer> | demo]");
            bail!("unknown command: {}", other)
        }
    }
}

/// Parse an OCR text dump and print the plate items it yields.
fn run_parse(path: &Path) -> Result<()> {
    let raw_text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt text: {}", path.display()))?;

    let parser = ReceiptParser::new();
    let items = parser.parse(&raw_text);

    if items.is_empty() {
        println!("レシートから品目を検出できませんでした");
        return Ok(());
    }

    println!("🧾 検出した品目:");
    for item in &items {
        println!("  {}: {}円", item.name, item.price);
    }
    println!("✓ {}品目を検出しました", items.len());

    Ok(())
}

/// Load a session snapshot from JSON and print the settlement for a payer.
fn run_settle(path: &Path, payer: &str) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    let session: SplitSession =
        serde_json::from_str(&json).context("Failed to parse session JSON")?;

    let report = session.settle(payer)?;
    print_report(&report);

    Ok(())
}

/// End-to-end walkthrough on canned data: scan a receipt, register
/// participants, record counts, settle.
fn run_demo() -> Result<()> {
    println!("🍣 warikan demo");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let recognizer = CannedRecognizer::new(
        [
            "スシロー 渋谷店",
            "まぐろ 150円",
            "サーモン　１８０円",
            "えび 120円",
            "小計 450",
            "合計 450円",
        ]
        .join("\n"),
    );
    let parser = ReceiptParser::new();
    let items = scan_receipt(&recognizer, &[], &parser)?;

    let mut session = SplitSession::new();
    let added = session.import_receipt_items(&items);
    println!("\n📷 レシート読み取り: {}品目を追加しました", added);
    for plate in session.plate_types() {
        println!("  [{}] {}: {}円", plate.id, plate.name, plate.unit_price);
    }

    let taro = session.add_participant("太郎");
    let hanako = session.add_participant("花子");

    session.set_plate_count(taro, 1, 2); // まぐろ x2
    session.set_plate_count(taro, 3, 1); // えび x1
    session.set_plate_count(hanako, 2, 3); // サーモン x3

    let report = session.settle("太郎")?;
    println!();
    print_report(&report);

    Ok(())
}

fn print_report(report: &warikan::SettlementReport) {
    println!("💴 支払額:");
    for total in &report.per_participant {
        println!("  {}: {}円", total.name, total.amount);
    }

    println!("\n精算メッセージ:");
    println!("{}", report.transfer_text());
}
