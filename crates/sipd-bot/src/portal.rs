//! URLs, timing budgets and the selector table for the SIPD-RI portal.
//!
//! Everything here is configuration. When the portal's markup shifts,
//! this is the file that changes; the workflows only know logical names.

use sipd_browser::Target;
use std::time::Duration;

// URLs
pub const LOGIN_URL: &str = "https://sipd.kemendagri.go.id/penatausahaan/login";
pub const AKLAP_URL: &str = "https://sipd.kemendagri.go.id/penatausahaan/aklap";
pub const REALISASI_URL: &str =
    "https://sipd.kemendagri.go.id/penatausahaan/pengeluaran/laporan/realisasi";
/// Route fragment the SPA shows once a session is authenticated.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

// Timing budgets
/// Full page loads over the portal's slow upstream.
pub const PAGE_LOAD: Duration = Duration::from_secs(120);
/// Outer bound on the operator finishing credentials and CAPTCHA.
pub const LOGIN_WAIT: Duration = Duration::from_secs(300);
/// Element wait inside the reload-and-retry guard.
pub const GUARD_WAIT: Duration = Duration::from_secs(3);
/// Per-indicator wait when probing for the 404 page.
pub const INDICATOR_WAIT: Duration = Duration::from_secs(2);
/// Menus and form controls on an already-loaded page.
pub const CONTROL_WAIT: Duration = Duration::from_secs(10);
/// Autocomplete suggestions are the portal's flakiest rendering.
pub const SUGGESTION_WAIT: Duration = Duration::from_secs(10);
/// The all-SKPD realization workbook takes the longest to produce.
pub const REPORT_DOWNLOAD: Duration = Duration::from_secs(120);
pub const ATTACHMENT_DOWNLOAD: Duration = Duration::from_secs(60);

// Login page
pub const USERNAME_INPUT: Target = Target::css("#ed_username");
pub const PASSWORD_INPUT: Target = Target::css("#ed_password");
/// Account card for the treasury role, with its pick button.
pub const ACCOUNT_CARD: Target =
    Target::labelled("div.account-select-card", "Bendahara Umum Daerah", "button");
/// Top-level accounting menu; present only behind a live session.
pub const MENU_ACCOUNTING: Target = Target::text("a", "Akuntansi");

// The portal's 404 page, recognized only when all three are present.
pub const NOT_FOUND_HEADING: Target = Target::text("h1", "404");
pub const NOT_FOUND_MESSAGE: Target = Target::text("span", "This page could not be found");
pub const NOT_FOUND_HOME_LINK: Target = Target::text("a", "Redirect to home page");

// Laporan Realisasi
pub const REALISASI_HEADING: Target = Target::text("h1", "Laporan Realisasi");
pub const REALISASI_UNIT_INPUT: Target = Target::css("div.css-j93siq input");
/// Month filter reuses the unit filter's markup; it is the second match.
pub const REALISASI_MONTH_INPUT: Target = Target::nth("div.css-j93siq input", 1);
pub const REALISASI_DOWNLOAD_BUTTON: Target = Target::text("button", "Download");
/// Filter entry that bundles every SKPD into one workbook.
pub const ALL_UNITS_OPTION: &str = "Unduh Semua SKPD";

// AKLAP dashboard and the Lampiran print modal
pub const LPPD_LINK: Target = Target::text("a", "LPPD");
pub const LAMPIRAN_PERKADA_PRINT: Target =
    Target::labelled("tr", "Lampiran I.1 (Perkada)", "button");
pub const MODAL_BODY: Target = Target::css("div.modal-body");
pub const PRINT_MENU_BUTTON: Target = Target::css("footer.modal-footer button.dropdown-toggle");
pub const PDF_OPTION: Target = Target::text("footer.modal-footer a.dropdown-item", "PDF");
/// Consolidation level covering the SKPD and its units.
pub const CONSOLIDATED_OPTION: &str = "SKPD dan Unit";
/// Popup the portal raises when it refuses to print a unit.
pub const FAILURE_POPUP: Target = Target::text("h2", "Gagal Cetak");
pub const FAILURE_POPUP_OK: Target = Target::text("button", "OK");

/// The print modal's fieldsets: 0 = SKPD, 1 = consolidation, 2 = radios.
pub fn modal_fieldset_input(index: usize) -> Target {
    Target::nth("div.modal-body fieldset", index).child("input")
}

/// Radio label picking the per-SKPD report variant.
pub fn per_unit_radio() -> Target {
    Target::nth("div.modal-body fieldset", 2).child_nth("label", 1)
}

// Posting Jurnal
pub const POSTING_MENU: Target = Target::text("a.dropdown-toggle", "Posting Jurnal");
pub const BELANJA_SUBMENU: Target = Target::text("a.sidebar-link", "Belanja");
pub const APPLY_BUTTON: Target = Target::text("div.card-body button", "Terapkan");
pub const TABLE_ROWS: Target = Target::css("div.card-body table tbody tr");
/// Action dropdown sits in the eighth column of the first pending row.
pub const FIRST_ROW_ACTION: Target =
    Target::css("div.card-body table tbody tr:first-child td:nth-child(8) div.dropdown");
pub const ROW_POSTING_OPTION: Target = Target::text(
    "div.card-body table tbody tr:first-child td:nth-child(8) div.dropdown a",
    "Posting",
);
pub const POSTING_MODAL_INPUT: Target = Target::css("div.modal-body input");
pub const POSTING_METHOD_LISTBOX: Target = Target::css("div.modal-body ul[role=\"listbox\"]");
pub const MODAL_CONFIRM_BUTTON: Target = Target::css("footer.modal-footer button.btn-success");
pub const SUCCESS_POPUP: Target = Target::text("h2.swal2-title", "Success");
/// Filter value selecting journals still awaiting posting.
pub const STATUS_PENDING: &str = "Belum di posting/reject";
pub const METHOD_ASSET: &str = "Metode Aset";
pub const METHOD_NONE: &str = "Tanpa Metode";

/// The Belanja filter card's form groups: 0 = SKPD, 4 = status.
pub fn filter_input(index: usize) -> Target {
    Target::nth("div.card-body div.form-group", index).child("input")
}

/// Suggestion in the filter card's open listbox.
pub fn filter_option(text: impl Into<String>) -> Target {
    Target::containing("div.card-body ul[role=\"listbox\"] li", text)
}

/// Posting-method option inside the row's posting modal.
pub fn posting_method_option(text: impl Into<String>) -> Target {
    Target::containing("div.modal-body ul[role=\"listbox\"] li", text)
}

// Jurnal Umum
pub const JURNAL_MENU: Target = Target::text("a.sidebar-link", "Jurnal Umum");
pub const INPUT_TAB: Target = Target::text("div.card-header a", "Input Jurnal Umum");
pub const ACCOUNT_INPUT: Target = Target::labelled(
    "div.tab-content div.active fieldset",
    "Kode Rekening",
    "input",
);
pub const DEBIT_INPUT: Target =
    Target::labelled("div.tab-content div.active fieldset", "Debit", "input");
pub const CREDIT_INPUT: Target =
    Target::labelled("div.tab-content div.active fieldset", "Kredit", "input");
pub const ADD_ROW_BUTTON: Target =
    Target::text("div.tab-content div.active fieldset button", "Tambah");

/// Account-code suggestion in the journal entry form's listbox.
pub fn account_option(code: impl Into<String>) -> Target {
    Target::containing("div.tab-content div.active fieldset ul[role=\"listbox\"] li", code)
}
