//! Host identity for notification titles.

use std::process::Command;

/// Resolve the fully-qualified name of this host.
///
/// Asks `hostname -f` first (which consults the resolver), then falls back
/// to the kernel host name, then to `localhost`.
pub fn fqdn() -> String {
    fqdn_from_command()
        .or_else(local_hostname)
        .unwrap_or_else(|| "localhost".to_string())
}

fn fqdn_from_command() -> Option<String> {
    let output = Command::new("hostname").arg("-f").output().ok()?;
    if !output.status.success() {
        return None;
    }
    non_empty(String::from_utf8_lossy(&output.stdout).trim())
}

#[cfg(unix)]
fn local_hostname() -> Option<String> {
    use std::ffi::CStr;

    let mut buf = [0u8; 256];
    // SAFETY: the pointer and length describe a writable buffer we own.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if rc != 0 {
        return None;
    }
    // Truncated names are not guaranteed to be terminated.
    buf[buf.len() - 1] = 0;

    let name = CStr::from_bytes_until_nul(&buf).ok()?;
    name.to_str().ok().and_then(non_empty)
}

#[cfg(not(unix))]
fn local_hostname() -> Option<String> {
    std::env::var("COMPUTERNAME").ok().and_then(|n| non_empty(&n))
}

fn non_empty(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
