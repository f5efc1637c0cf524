//! Content-type detection from leading magic bytes.

use std::fs::{self, File, FileType};
use std::io::{self, Read};
use std::path::Path;

/// Enough to reach the `ustar` marker at offset 257.
const SNIFF_LEN: u64 = 512;

/// Prefix signatures, checked in order.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"BM", "image/bmp"),
    (b"II*\x00", "image/tiff"),
    (b"MM\x00*", "image/tiff"),
    (b"\x00\x00\x01\x00", "image/vnd.microsoft.icon"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"PK\x05\x06", "application/zip"),
    (b"\x1f\x8b", "application/gzip"),
    (b"BZh", "application/x-bzip2"),
    (b"\xfd7zXZ\x00", "application/x-xz"),
    (b"\x28\xb5\x2f\xfd", "application/zstd"),
    (b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    (b"Rar!\x1a\x07", "application/x-rar"),
    (b"\x7fELF", "application/x-executable"),
    (b"\xfe\xed\xfa\xce", "application/x-mach-binary"),
    (b"\xfe\xed\xfa\xcf", "application/x-mach-binary"),
    (b"\xce\xfa\xed\xfe", "application/x-mach-binary"),
    (b"\xcf\xfa\xed\xfe", "application/x-mach-binary"),
    (b"MZ", "application/vnd.microsoft.portable-executable"),
    (b"\x00asm", "application/wasm"),
    (b"SQLite format 3\x00", "application/vnd.sqlite3"),
    (b"ID3", "audio/mpeg"),
    (b"OggS", "audio/ogg"),
    (b"fLaC", "audio/flac"),
];

/// Sniff the content type of the file at `path`.
///
/// Only regular files are opened; reading a FIFO or device could block.
pub fn sniff_path(path: &Path) -> io::Result<&'static str> {
    let file_type = fs::metadata(path)?.file_type();
    if !file_type.is_file() {
        return Ok(special_label(file_type));
    }

    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
    Ok(sniff_bytes(&head))
}

#[cfg(unix)]
fn special_label(file_type: FileType) -> &'static str {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_dir() {
        "inode/directory"
    } else if file_type.is_fifo() {
        "inode/fifo"
    } else if file_type.is_char_device() {
        "inode/chardevice"
    } else if file_type.is_block_device() {
        "inode/blockdevice"
    } else if file_type.is_socket() {
        "inode/socket"
    } else {
        "inode/x-special"
    }
}

#[cfg(not(unix))]
fn special_label(file_type: FileType) -> &'static str {
    if file_type.is_dir() {
        "inode/directory"
    } else {
        "inode/x-special"
    }
}

/// Classify the leading bytes of a file.
pub fn sniff_bytes(head: &[u8]) -> &'static str {
    if head.is_empty() {
        return "inode/x-empty";
    }

    if let Some((_, mime)) = SIGNATURES.iter().find(|(magic, _)| head.starts_with(magic)) {
        return *mime;
    }

    // 0xCAFEBABE is shared by universal Mach-O and Java class files; fat
    // binaries store a small arch count where class files store a version >= 45
    if head.starts_with(b"\xca\xfe\xba\xbe") && head.len() >= 8 {
        let next = u32::from_be_bytes([head[4], head[5], head[6], head[7]]);
        return if next < 45 {
            "application/x-mach-binary"
        } else {
            "application/x-java-applet"
        };
    }

    if head.len() >= 12 && &head[0..4] == b"RIFF" {
        match &head[8..12] {
            b"WEBP" => return "image/webp",
            b"WAVE" => return "audio/x-wav",
            b"AVI " => return "video/x-msvideo",
            _ => {}
        }
    }

    if head.len() >= 8 && &head[4..8] == b"ftyp" {
        return "video/mp4";
    }

    if head.len() >= 262 && &head[257..262] == b"ustar" {
        return "application/x-tar";
    }

    if is_text(head) {
        return sniff_text(head);
    }

    "application/octet-stream"
}

fn is_text(head: &[u8]) -> bool {
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        // A multi-byte character cut off by the sniff window is still text
        Err(e) => e.error_len().is_none(),
    }
}

fn sniff_text(head: &[u8]) -> &'static str {
    let body = head.strip_prefix(b"\xef\xbb\xbf").unwrap_or(head);
    let trimmed = body.trim_ascii_start();
    let lower: Vec<u8> = trimmed.iter().take(16).map(u8::to_ascii_lowercase).collect();

    if trimmed.starts_with(b"#!") {
        "text/x-shellscript"
    } else if trimmed.starts_with(b"<?xml") {
        "text/xml"
    } else if lower.starts_with(b"<!doctype html") || lower.starts_with(b"<html") {
        "text/html"
    } else if trimmed.starts_with(b"{") || trimmed.starts_with(b"[") {
        "application/json"
    } else {
        "text/plain"
    }
}
