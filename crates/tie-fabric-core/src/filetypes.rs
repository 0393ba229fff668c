// crates/tie-fabric-core/src/filetypes.rs
// ============================================================================
// Module: File Type Identifiers
// Description: Numeric file-type identifiers for external reputation reports.
// Purpose: Validate the file type field of external file reports.
// Dependencies: none
// ============================================================================

//! ## Overview
//! External reputation reports carry a numeric file-type discriminator.
//! The identifiers are fixed by the service protocol; compound types are
//! bitwise combinations of base types (for example `PEEXE` = `PE | EXE`).

// ============================================================================
// SECTION: File Types
// ============================================================================

/// Unspecified file type.
pub const NONE: i64 = 0;
/// DOS COM executable.
pub const COM: i64 = 1;
/// Generic executable.
pub const EXE: i64 = 2;
/// Driver binary.
pub const DRV: i64 = 4;
/// Boot sector image.
pub const BOOT: i64 = 8;
/// Portable executable container.
pub const PE: i64 = 16;
/// Portable executable program.
pub const PEEXE: i64 = 18;
/// Virtual device driver.
pub const VXD: i64 = 64;
/// Non-PE dynamic library.
pub const DLLNONPE: i64 = 128;
/// Dynamic library.
pub const DLL: i64 = 144;
/// Windows binary.
pub const WIN: i64 = 272;
/// MZ stub executable.
pub const MZSTUB: i64 = 512;
/// NetWare loadable module.
pub const NLM: i64 = 1024;
/// ELF binary.
pub const ELF: i64 = 2048;
/// JavaScript source.
pub const JS: i64 = 4096;
/// VBScript source.
pub const VBS: i64 = 8192;
/// Generic script.
pub const SCRIPT: i64 = 12288;
/// OLE compound document.
pub const OLE: i64 = 16384;
/// Image file.
pub const PIC: i64 = 65536;
/// Plain text file.
pub const TEXT: i64 = 131072;
/// Batch script.
pub const BAT: i64 = 143360;
/// HTML document.
pub const HTML: i64 = 262144;
/// HTML text document.
pub const HTMLTEXT: i64 = 393216;
/// HTML application.
pub const HTA: i64 = 524288;
/// Rich text document.
pub const RTF: i64 = 1048576;
/// PDF document.
pub const PDF: i64 = 2097152;
/// Multimedia file.
pub const MMEDIA: i64 = 4194304;
/// URL shortcut.
pub const URL: i64 = 8388608;
/// System binary.
pub const SYS: i64 = 16777232;
/// ZIP archive.
pub const ZIP: i64 = 33587200;

/// The complete set of known file-type identifiers.
pub const KNOWN_FILE_TYPES: [i64; 30] = [
    NONE, COM, EXE, DRV, BOOT, PE, PEEXE, VXD, DLLNONPE, DLL, WIN, MZSTUB, NLM, ELF, JS, VBS,
    SCRIPT, OLE, PIC, TEXT, BAT, HTML, HTMLTEXT, HTA, RTF, PDF, MMEDIA, URL, SYS, ZIP,
];

/// Returns true when the identifier names a known file type.
#[must_use]
pub fn is_known_file_type(file_type: i64) -> bool {
    KNOWN_FILE_TYPES.contains(&file_type)
}
