use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use billing_forms_client::RemoteBillingIdLookup;
use billing_forms_core::bulk::{
    apply_bulk_action, formset_field_name, select_all, selected_indices,
};
use billing_forms_core::{
    spawn_field_validator, summarize, ActionKind, BillingIdService, BulkAction, UpdateRow, Verdict,
};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;

#[derive(Args)]
pub struct CheckArgs {
    /// Billing IDs to validate (e.g. 123456-789).
    ids: Vec<String>,
    /// Read additional IDs from a file, one per line.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
pub struct BulkArgs {
    /// JSON file holding the form rows.
    #[arg(long)]
    rows: PathBuf,
    /// Write this value into every selected row.
    #[arg(long, conflicts_with_all = ["find", "replace"])]
    set_to: Option<String>,
    /// Only rows whose current billing ID equals this value are updated.
    #[arg(long, requires = "replace")]
    find: Option<String>,
    /// Replacement for rows matched by --find.
    #[arg(long, requires = "find")]
    replace: Option<String>,
    /// Row indices to act on; defaults to the rows marked selected.
    #[arg(long, value_delimiter = ',')]
    select: Vec<usize>,
    /// Act on every row.
    #[arg(long, conflicts_with = "select")]
    all: bool,
    /// Print the updated form fields as `name=value` lines instead of JSON.
    #[arg(long)]
    form_fields: bool,
}

pub async fn run_check(config: &Config, args: CheckArgs) -> anyhow::Result<()> {
    let contents = match &args.file {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };
    let text = gather_ids(&args.ids, contents.as_deref())?;

    let lookup = RemoteBillingIdLookup::new(config.lookup_config())?;
    let service = BillingIdService::new(Arc::new(lookup));
    let results = service.validate_many(&text).await;

    for (raw, verdict) in &results {
        println!("{}: {}", raw, verdict);
    }
    println!("{}", summarize(&results));
    check_outcome(&results)
}

/// Positional IDs first, then the file's lines, one ID per line.
fn gather_ids(ids: &[String], file_contents: Option<&str>) -> anyhow::Result<String> {
    let mut text = ids.join("\n");
    if let Some(contents) = file_contents {
        text.push('\n');
        text.push_str(contents);
    }
    if text.trim().is_empty() {
        bail!("No billing IDs given");
    }
    Ok(text)
}

fn check_outcome(results: &[(String, Verdict)]) -> anyhow::Result<()> {
    let failed = results
        .iter()
        .filter(|(_, verdict)| *verdict != Verdict::Valid)
        .count();
    if failed > 0 {
        bail!("{} of {} billing ID(s) did not validate", failed, results.len());
    }
    Ok(())
}

pub async fn run_watch(config: &Config) -> anyhow::Result<()> {
    let lookup = RemoteBillingIdLookup::new(config.lookup_config())?;
    let handle = spawn_field_validator(Arc::new(lookup), config.field_config());

    let mut views = handle.subscribe();
    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            match serde_json::to_string(&view) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to render field view: {}", e),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        handle.key_change(line)?;
    }

    // End of input acts like leaving the field.
    handle.blur()?;
    let wait = config.quiet_interval + config.request_timeout;
    match tokio::time::timeout(wait, handle.settled()).await {
        Ok(view) => tracing::info!("Final status: {}", view?.status),
        Err(_) => tracing::warn!("Gave up waiting for the last lookup after {:?}", wait),
    }

    handle.shutdown().await;
    printer.await?;
    Ok(())
}

pub fn run_bulk(args: BulkArgs) -> anyhow::Result<()> {
    let action = bulk_action(&args)?;
    let raw = std::fs::read_to_string(&args.rows)
        .with_context(|| format!("Failed to read {}", args.rows.display()))?;
    let mut rows: Vec<UpdateRow> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a list of rows", args.rows.display()))?;

    apply_selection(&mut rows, &args.select, args.all);
    let selected = selected_indices(&rows);
    let written = apply_bulk_action(&mut rows, &selected, &action);
    tracing::info!("Updated {} of {} row(s)", written, rows.len());

    if args.form_fields {
        for line in form_field_lines(&rows) {
            println!("{}", line);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }
    Ok(())
}

/// `--all` ticks every row, `--select` replaces the file's checkboxes,
/// neither keeps them as loaded. Indices past the last row are ignored.
fn apply_selection(rows: &mut [UpdateRow], select: &[usize], all: bool) {
    if all {
        select_all(rows, true);
        return;
    }
    if select.is_empty() {
        return;
    }
    if let Some(index) = select.iter().find(|&&index| index >= rows.len()) {
        tracing::warn!("Ignoring row {}: only {} row(s) loaded", index, rows.len());
    }
    for (index, row) in rows.iter_mut().enumerate() {
        row.selected = select.contains(&index);
    }
}

fn bulk_action(args: &BulkArgs) -> anyhow::Result<BulkAction> {
    let (kind, updated) = match (&args.set_to, &args.replace) {
        (Some(value), None) => (ActionKind::SetTo, value),
        (None, Some(replace)) => (ActionKind::FindAndReplace, replace),
        _ => bail!("Pass either --set-to VALUE or --find OLD --replace NEW"),
    };
    let find = match (kind.shows_find_input(), &args.find) {
        (true, Some(find)) => find.as_str(),
        (false, None) => "",
        _ => bail!("--find only goes with --replace"),
    };
    Ok(BulkAction::from_form(kind, find, updated))
}

/// `name=value` pairs of the updated-billing-ID inputs, as the update form
/// posts them.
fn form_field_lines(rows: &[UpdateRow]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            format!(
                "{}={}",
                formset_field_name(index),
                urlencoding::encode(&row.updated_billing_id)
            )
        })
        .collect()
}
