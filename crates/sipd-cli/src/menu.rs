//! The interactive menu. Navigation is numeric; each entry hands off to a
//! command that owns one complete browser run.

use crate::commands::{self, RunContext};
use anyhow::Result;
use chrono::Datelike;
use console::Term;
use std::path::PathBuf;

const OPD_LIST: &str = "data/SKPD-2024.txt";
const UPT_LIST: &str = "data/SKPD-KPA-2024.txt";
const JOURNAL_FILE: &str = "data/jurnal-umum.csv";

pub fn run(ctx: &RunContext) -> Result<()> {
    tracing::info!("Menu launched");
    let term = Term::stdout();

    loop {
        term.clear_screen()?;
        print_header(&term)?;

        term.write_line("---------- Akuntansi ----------")?;
        term.write_line("1. Download Lampiran I.1 (Perkada)")?;
        term.write_line("2. Posting Jurnal - Belanja")?;
        term.write_line("3. Input Jurnal Umum")?;
        term.write_line("")?;
        term.write_line("---------- Penatausahaan ----------")?;
        term.write_line("4. Download Laporan Realisasi")?;
        term.write_line("")?;
        term.write_line("---------- Lain-lain ----------")?;
        term.write_line("9. Reset session cookies")?;
        term.write_line("0. Keluar")?;

        term.write_str("\nPilih opsi: ")?;
        let Some(choice) = read_input()? else {
            // Closed stdin; leave instead of spinning on the prompt.
            term.write_line("Selamat tinggal!")?;
            break;
        };

        match choice.as_str() {
            "1" => {
                if let Some(file) =
                    choose_unit_file(&term, "Download Lampiran I.1 (Perkada)")?
                {
                    show_result(&term, commands::lampiran::execute(ctx, &file))?;
                }
            }
            "2" => {
                if let Some(file) = choose_unit_file(&term, "Posting Jurnal - Belanja")? {
                    show_result(&term, commands::posting::execute(ctx, &file))?;
                }
            }
            "3" => show_result(&term, handle_jurnal(&term, ctx))?,
            "4" => show_result(&term, handle_realisasi(&term, ctx))?,
            "9" => show_result(&term, commands::session::execute(ctx))?,
            "0" => {
                term.write_line("Selamat tinggal!")?;
                break;
            }
            _ => {
                term.write_str("Pilihan tidak valid! Tekan Enter untuk melanjutkan...")?;
                read_input()?;
            }
        }
    }

    tracing::info!("Menu closed");
    Ok(())
}

fn print_header(term: &Term) -> Result<()> {
    term.write_line("")?;
    term.write_line("SIPD-RI Helper")?;
    term.write_line("By: Odhy (odhyp.com)")?;
    term.write_line("")?;
    Ok(())
}

fn handle_jurnal(term: &Term, ctx: &RunContext) -> Result<()> {
    let file = ask_path(term, "File jurnal (CSV)", JOURNAL_FILE)?;
    commands::jurnal::execute(ctx, &file)
}

fn handle_realisasi(term: &Term, ctx: &RunContext) -> Result<()> {
    let year = ask_number(term, "Tahun anggaran", current_year())?;
    let first = ask_number(term, "Bulan awal", 1u32)?;
    let last = ask_number(term, "Bulan akhir", 12u32)?;
    commands::realisasi::execute(ctx, year, first, last)
}

/// Submenu shared by the workflows that iterate over a unit-list file.
/// `None` means the operator backed out.
fn choose_unit_file(term: &Term, title: &str) -> Result<Option<PathBuf>> {
    loop {
        term.clear_screen()?;
        print_header(term)?;

        term.write_line(&format!("---------- {} ----------", title))?;
        term.write_line("1. Semua OPD")?;
        term.write_line("2. Semua UPT")?;
        term.write_line("3. File daftar lain...")?;
        term.write_line("0. Kembali")?;

        term.write_str("\nPilih opsi: ")?;
        let Some(choice) = read_input()? else {
            return Ok(None);
        };

        match choice.as_str() {
            "1" => return Ok(Some(PathBuf::from(OPD_LIST))),
            "2" => return Ok(Some(PathBuf::from(UPT_LIST))),
            "3" => return Ok(Some(ask_path(term, "Path file daftar SKPD", OPD_LIST)?)),
            "0" => return Ok(None),
            _ => {
                term.write_str("Pilihan tidak valid! Tekan Enter untuk melanjutkan...")?;
                read_input()?;
            }
        }
    }
}

/// Print a command's outcome, then hold the screen until Enter so the
/// batch summary is readable before the menu redraws.
fn show_result(term: &Term, result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => term.write_line("\n✅ Selesai!")?,
        Err(err) => {
            tracing::error!("Menu task failed: {:#}", err);
            term.write_line(&format!("\n⚠️  Gagal: {:#}", err))?;
        }
    }
    term.write_str("Tekan Enter untuk melanjutkan...")?;
    read_input()?;
    Ok(())
}

/// Read one input line. `None` means stdin is closed, which callers treat
/// as backing out rather than looping on an empty prompt forever.
fn read_input() -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_path(term: &Term, label: &str, default: &str) -> Result<PathBuf> {
    term.write_str(&format!("{} [{}]: ", label, default))?;
    let line = read_input()?.unwrap_or_default();
    Ok(PathBuf::from(if line.is_empty() {
        default.to_string()
    } else {
        line
    }))
}

fn ask_number<T>(term: &Term, label: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    term.write_str(&format!("{} [{}]: ", label, default))?;
    let line = read_input()?.unwrap_or_default();
    if line.is_empty() {
        return Ok(default);
    }
    line.parse()
        .map_err(|_| anyhow::anyhow!("angka tidak valid: {:?}", line))
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}
