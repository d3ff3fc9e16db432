// src/cli.rs
//
// Headless driver: load a saved page, run the matching adapter, optionally
// apply a bulk-edit file through the change propagator, export the table,
// optionally write the mutated page back out. No grid widget involved —
// the engine pieces are driven directly.

use std::{env, fs, path::PathBuf, rc::Rc};

use color_eyre::eyre::{OptionExt, Result, eyre};

use crate::adapters;
use crate::config::options::{DemoPage, ExportFormat, ExportOptions, LaunchOptions};
use crate::core::html::parse_document;
use crate::engine::propagate::EditOutcome;
use crate::engine::session::build_grid_columns;
use crate::engine::{IdentityIndex, apply_edit, extract};
use crate::export;

#[derive(Default)]
struct Params {
    launch: LaunchOptions,
    export: ExportOptions,
    adapter_name: Option<String>,
    fee_host: Option<String>,
    apply: Option<PathBuf>,
    write_page: Option<PathBuf>,
    list_adapters: bool,
    to_stdout: bool,
}

pub fn run() -> Result<()> {
    color_eyre::install()?;
    let params = parse_cli()?;

    if params.list_adapters {
        let doc = Rc::new(parse_document(""));
        for adapter in adapters::known_adapters(&doc) {
            println!("{}", adapter.name());
        }
        return Ok(());
    }

    let html = match &params.launch.page {
        Some(path) => fs::read_to_string(path)?,
        None => s!(params.launch.demo.unwrap_or(DemoPage::Listings).html()),
    };
    let doc = Rc::new(parse_document(&html));
    let url = params.launch.effective_url();

    let mut adapter = match &params.adapter_name {
        Some(name) => adapters::known_adapters(&doc)
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
            .ok_or_eyre(format!("no adapter named '{name}'"))?,
        None => adapters::activate(&doc, &url)
            .ok_or_eyre(format!("no adapter matched '{url}'"))?,
    };

    if let Some(fee_host) = &params.fee_host {
        if adapter.name() != "Restaurant Listings" {
            return Err(eyre!("--fee-host only applies to the listings adapter"));
        }
        let (host, port) = match fee_host.rsplit_once(':') {
            Some((h, p)) => (s!(h), p.parse().map_err(|_| eyre!("bad port in '{fee_host}'"))?),
            None => (fee_host.clone(), 80),
        };
        adapter = Box::new(
            adapters::listings::ListingsAdapter::new(doc.clone()).with_fee_service(&host, port),
        );
    }
    adapters::validate(adapter.as_ref()).map_err(|e| eyre!("{e}"))?;

    let columns = adapter.column_specs();
    let data_rows = adapter.data_rows().map_err(|e| eyre!("{e}"))?;
    let mut snapshot = extract(&data_rows, &columns);
    let mut index = IdentityIndex::build(&snapshot);
    eprintln!("{}: {} rows", adapter.name(), snapshot.len());

    if let Some(edits_path) = &params.apply {
        let text = fs::read_to_string(edits_path)?;
        let mut applied = 0usize;
        let mut rejected = 0usize;
        for edit in export::parse_rows(&text, ',') {
            let [id, field, value] = edit.as_slice() else {
                rejected += 1;
                eprintln!("skipping malformed edit row: {edit:?}");
                continue;
            };
            match apply_edit(&snapshot, &index, &columns, id, field, value) {
                EditOutcome::Applied => applied += 1,
                outcome => {
                    rejected += 1;
                    eprintln!("edit ({id}, {field}) rejected: {outcome:?}");
                }
            }
        }
        eprintln!("applied {applied} edits, rejected {rejected}");

        // Re-extract so the export reflects the written-back values.
        snapshot = extract(&adapter.data_rows().map_err(|e| eyre!("{e}"))?, &columns);
        index = IdentityIndex::build(&snapshot);
    }

    let grid_columns = build_grid_columns(&columns);
    let headers = Some(grid_columns.iter().map(|c| c.field.clone()).collect());
    let rows = snapshot.table_rows(&index, &grid_columns);
    let sep = params.export.format.delim();

    if params.to_stdout {
        print!(
            "{}",
            export::to_export_string(&headers, &rows, params.export.include_headers, sep)
        );
    } else {
        let path = params.export.out_path();
        export::write_export(&path, &headers, &rows, params.export.include_headers, sep)
            .map_err(|e| eyre!("{e}"))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(page_out) = &params.write_page {
        fs::write(page_out, doc.to_html())?;
        eprintln!("wrote {}", page_out.display());
    }

    Ok(())
}

fn parse_cli() -> Result<Params> {
    let mut params = Params::default();
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--page" => {
                params.launch.page =
                    Some(PathBuf::from(args.next().ok_or_eyre("Missing value for --page")?));
            }
            "--url" => params.launch.url = Some(args.next().ok_or_eyre("Missing value for --url")?),
            "--adapter" => {
                params.adapter_name = Some(args.next().ok_or_eyre("Missing value for --adapter")?);
            }
            "--fee-host" => {
                params.fee_host = Some(args.next().ok_or_eyre("Missing value for --fee-host")?);
            }
            "--demo" => {
                let v = args.next().ok_or_eyre("Missing value for --demo")?;
                params.launch.demo = Some(match v.to_ascii_lowercase().as_str() {
                    "listings" => DemoPage::Listings,
                    "booking" => DemoPage::Booking,
                    other => return Err(eyre!("Unknown demo page: {other}")),
                });
            }
            "--apply" => {
                params.apply =
                    Some(PathBuf::from(args.next().ok_or_eyre("Missing value for --apply")?));
            }
            "--write-page" => {
                params.write_page =
                    Some(PathBuf::from(args.next().ok_or_eyre("Missing value for --write-page")?));
            }
            "-o" | "--out" => {
                params.export.out =
                    Some(PathBuf::from(args.next().ok_or_eyre("Missing output path")?));
            }
            "--stdout" => params.to_stdout = true,
            "--format" => {
                let v = args.next().ok_or_eyre("Missing value for --format")?;
                params.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(eyre!("Unknown format: {other}")),
                };
            }
            "--no-headers" => params.export.include_headers = false,
            "--list-adapters" => params.list_adapters = true,
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(eyre!("Unknown arg: {a}")),
        }
    }
    Ok(params)
}
