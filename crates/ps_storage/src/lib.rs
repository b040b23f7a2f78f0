pub mod backends;

pub use backends::fs::FsStore;
pub use backends::memory::MemoryStore;

/// Strip characters that are invalid in filenames, replace spaces with
/// underscores, and cap the length.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(100)
        .collect()
}
