#![deny(clippy::all)]
//! C ABI for termdown
//!
//! Every render function takes NUL-terminated UTF-8 strings and returns a
//! newly allocated string that the caller owns and must release with
//! [`termdown_free`]. Failures of any kind return an empty string, never
//! null. Null string arguments read as empty.
//!
//! The matching C declarations live in `include/termdown.h`.

pub mod bridge;
pub mod buffer;
pub mod request;

use std::ffi::{c_char, c_int};

pub use bridge::{version_info, BridgeError};
pub use buffer::OwnedCString;
pub use request::{ColorProfileArg, RenderRequest};

use request::{read_c_str, read_optional_c_str};

/// Render Markdown with a style name or style file path. An empty style
/// selects `dark`.
///
/// # Safety
///
/// `markdown` and `style` must each be null or a valid NUL-terminated
/// string. The result must be released with [`termdown_free`].
#[no_mangle]
pub unsafe extern "C" fn termdown_render(
    markdown: *const c_char,
    style: *const c_char,
) -> *mut c_char {
    let markdown = read_c_str(markdown);
    let style = read_c_str(style);
    bridge::respond(|| bridge::render_default(&markdown, &style)).into_raw()
}

/// Render Markdown wrapped at `width` columns. `width` is passed on as
/// given; 0 or less uses the default of 80.
///
/// # Safety
///
/// Same contract as [`termdown_render`].
#[no_mangle]
pub unsafe extern "C" fn termdown_render_with_width(
    markdown: *const c_char,
    style: *const c_char,
    width: c_int,
) -> *mut c_char {
    let markdown = read_c_str(markdown);
    let style = read_c_str(style);
    bridge::respond(|| bridge::render_with_width(&markdown, &style, width)).into_raw()
}

/// Render Markdown with every option.
///
/// An empty `style` detects one from the output stream. `width` applies when
/// positive, `emoji` and `preserve_newlines` when nonzero, `base_url` when
/// non-null and non-empty. `color_profile` is 0 (detect), 1 (true color),
/// 2 (256 colors), 3 (ANSI) or 4 (no colors); other values keep the default.
///
/// # Safety
///
/// `markdown`, `style` and `base_url` must each be null or a valid
/// NUL-terminated string. The result must be released with
/// [`termdown_free`].
#[no_mangle]
pub unsafe extern "C" fn termdown_render_with_options(
    markdown: *const c_char,
    style: *const c_char,
    width: c_int,
    emoji: c_int,
    preserve_newlines: c_int,
    base_url: *const c_char,
    color_profile: c_int,
) -> *mut c_char {
    let markdown = read_c_str(markdown);
    let style = read_c_str(style);
    let base_url = read_optional_c_str(base_url);
    bridge::respond(|| {
        bridge::render_with_options(
            &markdown,
            &style,
            width,
            emoji,
            preserve_newlines,
            base_url,
            color_profile,
        )
    })
    .into_raw()
}

/// Render Markdown with a style document given as JSON. `width` applies
/// when positive.
///
/// # Safety
///
/// `markdown` and `json_style` must each be null or a valid NUL-terminated
/// string. The result must be released with [`termdown_free`].
#[no_mangle]
pub unsafe extern "C" fn termdown_render_with_json_style(
    markdown: *const c_char,
    json_style: *const c_char,
    width: c_int,
) -> *mut c_char {
    let markdown = read_c_str(markdown);
    let json_style = read_c_str(json_style);
    bridge::respond(|| bridge::render_with_json_style(&markdown, &json_style, width)).into_raw()
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by a `termdown_*` function that
/// has not been released yet. It must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn termdown_free(ptr: *mut c_char) {
    drop(OwnedCString::from_raw(ptr));
}

/// Version of the embedded renderer, or `unknown`. The result must be
/// released with [`termdown_free`].
#[no_mangle]
pub extern "C" fn termdown_upstream_version() -> *mut c_char {
    bridge::respond(|| Ok(bridge::upstream_version().to_string())).into_raw()
}

/// `termdown-ffi v<version> (upstream <version>)`. The result must be
/// released with [`termdown_free`].
#[no_mangle]
pub extern "C" fn termdown_version() -> *mut c_char {
    bridge::respond(|| Ok(version_info())).into_raw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::live_allocations;
    use std::ffi::{CStr, CString};
    use std::ptr;

    fn c(text: &str) -> CString {
        CString::new(text).unwrap()
    }

    /// Read and release a returned string
    fn take(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        unsafe { termdown_free(ptr) };
        text
    }

    fn visible_width(line: &str) -> usize {
        line.chars()
            .fold((0, false), |(width, in_escape), ch| match (in_escape, ch) {
                (false, '\x1b') => (width, true),
                (true, 'm') => (width, false),
                (true, _) => (width, true),
                (false, _) => (width + 1, false),
            })
            .0
    }

    #[test]
    fn test_render_title_and_body() {
        let markdown = c("# Title\n\nBody text.");
        let output = take(unsafe { termdown_render(markdown.as_ptr(), ptr::null()) });
        assert!(output.contains("Title"));
        assert!(output.contains("Body text."));
        let title = output.find("Title").unwrap();
        let body = output.find("Body text.").unwrap();
        assert!(title < body);
        assert_eq!(live_allocations(), 0);
    }

    #[test]
    fn test_empty_input_renders_empty() {
        let empty = c("");
        let style = c("dark");
        assert_eq!(take(unsafe { termdown_render(empty.as_ptr(), style.as_ptr()) }), "");
        assert_eq!(
            take(unsafe {
                termdown_render_with_options(empty.as_ptr(), style.as_ptr(), 0, 0, 0, ptr::null(), 4)
            }),
            ""
        );
    }

    #[test]
    fn test_missing_style_file_renders_empty() {
        let markdown = c("# Title");
        let style = c("/nonexistent/path/to/style.json");
        assert_eq!(
            take(unsafe { termdown_render(markdown.as_ptr(), style.as_ptr()) }),
            ""
        );
        assert_eq!(
            take(unsafe { termdown_render_with_width(markdown.as_ptr(), style.as_ptr(), 40) }),
            ""
        );
        assert_eq!(live_allocations(), 0);
    }

    #[test]
    fn test_width_bounds_lines() {
        let markdown = c(
            "This paragraph is long enough that it has to be wrapped onto several \
             lines when the width is small.",
        );
        let style = c("notty");
        let output = take(unsafe {
            termdown_render_with_width(markdown.as_ptr(), style.as_ptr(), 24)
        });
        assert!(output.lines().filter(|l| !l.is_empty()).count() > 3);
        for line in output.lines() {
            assert!(visible_width(line) <= 24, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_width_bounds_tables() {
        let markdown = c(
            "| Name | Description |\n|---|---|\n\
             | alpha | a fairly long description of the first entry |\n\
             | beta | another entry that needs more than one line |",
        );
        let style = c("dark");
        let output = take(unsafe {
            termdown_render_with_width(markdown.as_ptr(), style.as_ptr(), 30)
        });
        assert!(output.contains("alpha"));
        assert!(output.contains("description"));
        for line in output.lines() {
            assert!(visible_width(line) <= 30, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_deeply_nested_input_renders() {
        let style = c("notty");

        let quotes = c(&format!("{}x", ">".repeat(100_000)));
        let output = take(unsafe { termdown_render(quotes.as_ptr(), style.as_ptr()) });
        assert!(output.contains('x'));

        let lists = c(&format!("{}item", "- ".repeat(5_000)));
        let output = take(unsafe { termdown_render(lists.as_ptr(), style.as_ptr()) });
        assert!(output.contains("item"));

        let emphasis = c(&format!("{}deep{}", "*a ".repeat(5_000), " b*".repeat(5_000)));
        let output = take(unsafe { termdown_render(emphasis.as_ptr(), style.as_ptr()) });
        assert!(output.contains("deep"));
        assert_eq!(live_allocations(), 0);
    }

    #[test]
    fn test_non_positive_width_uses_default() {
        let markdown = c(&"word ".repeat(30));
        let style = c("notty");
        let default = take(unsafe { termdown_render(markdown.as_ptr(), style.as_ptr()) });
        let zero = take(unsafe { termdown_render_with_width(markdown.as_ptr(), style.as_ptr(), 0) });
        let negative =
            take(unsafe { termdown_render_with_width(markdown.as_ptr(), style.as_ptr(), -10) });
        assert!(!default.is_empty());
        assert_eq!(zero, default);
        assert_eq!(negative, default);
    }

    #[test]
    fn test_emoji_flag() {
        let markdown = c("# Hello :wave:");
        let style = c("notty");

        let off = take(unsafe {
            termdown_render_with_options(markdown.as_ptr(), style.as_ptr(), 0, 0, 0, ptr::null(), 4)
        });
        assert!(off.contains(":wave:"));

        let on = take(unsafe {
            termdown_render_with_options(markdown.as_ptr(), style.as_ptr(), 0, 1, 0, ptr::null(), 4)
        });
        assert!(on.contains("👋"));
        assert!(!on.contains(":wave:"));
    }

    #[test]
    fn test_preserve_newlines_flag() {
        let markdown = c("line one\nline two");
        let style = c("notty");

        let reflowed = take(unsafe {
            termdown_render_with_options(markdown.as_ptr(), style.as_ptr(), 0, 0, 0, ptr::null(), 4)
        });
        assert!(reflowed.contains("line one line two"));

        let preserved = take(unsafe {
            termdown_render_with_options(markdown.as_ptr(), style.as_ptr(), 0, 0, 1, ptr::null(), 4)
        });
        assert!(!preserved.contains("line one line two"));
        assert!(preserved.contains("line one\n"));
    }

    #[test]
    fn test_base_url() {
        let markdown = c("[guide](guide.md)");
        let style = c("notty");
        let base = c("https://example.com/docs/");
        let output = take(unsafe {
            termdown_render_with_options(markdown.as_ptr(), style.as_ptr(), 0, 0, 0, base.as_ptr(), 4)
        });
        assert!(output.contains("https://example.com/docs/guide.md"));

        let empty = c("");
        let output = take(unsafe {
            termdown_render_with_options(markdown.as_ptr(), style.as_ptr(), 0, 0, 0, empty.as_ptr(), 4)
        });
        assert!(output.contains("guide.md"));
        assert!(!output.contains("https://"));
    }

    #[test]
    fn test_color_profiles() {
        let markdown = c("**bold** text");
        let style = c("dark");
        let render = |profile| {
            take(unsafe {
                termdown_render_with_options(
                    markdown.as_ptr(),
                    style.as_ptr(),
                    0,
                    0,
                    0,
                    ptr::null(),
                    profile,
                )
            })
        };

        let ascii = render(4);
        assert!(!ascii.contains("38;"));
        assert!(render(2).contains("38;5;"));

        let unknown = render(42);
        let truecolor = render(1);
        assert_eq!(unknown, truecolor);
    }

    #[test]
    fn test_json_style() {
        let markdown = c("**hi**");
        let json = c(r#"{"strong": {"prefix": "<", "suffix": ">"}}"#);
        let output = take(unsafe {
            termdown_render_with_json_style(markdown.as_ptr(), json.as_ptr(), 0)
        });
        assert_eq!(output, "<hi>");

        let broken = c("{ not json");
        let output = take(unsafe {
            termdown_render_with_json_style(markdown.as_ptr(), broken.as_ptr(), 0)
        });
        assert_eq!(output, "");
    }

    #[test]
    fn test_null_arguments() {
        let output = take(unsafe { termdown_render(ptr::null(), ptr::null()) });
        assert_eq!(output, "");
        let output = take(unsafe { termdown_render_with_json_style(ptr::null(), ptr::null(), 0) });
        assert_eq!(output, "");
    }

    #[test]
    fn test_free_null_is_a_no_op() {
        unsafe { termdown_free(ptr::null_mut()) };
        assert_eq!(live_allocations(), 0);
    }

    #[test]
    fn test_every_result_is_released_once() {
        let markdown = c("- a\n- b");
        let style = c("ascii");
        let results = [
            unsafe { termdown_render(markdown.as_ptr(), style.as_ptr()) },
            unsafe { termdown_render_with_width(markdown.as_ptr(), style.as_ptr(), 20) },
            unsafe { termdown_render_with_json_style(markdown.as_ptr(), style.as_ptr(), 20) },
            termdown_upstream_version(),
            termdown_version(),
        ];
        assert_eq!(live_allocations(), results.len() as isize);

        for ptr in results {
            unsafe { termdown_free(ptr) };
        }
        assert_eq!(live_allocations(), 0);
    }

    #[test]
    fn test_versions() {
        let upstream = take(termdown_upstream_version());
        assert!(!upstream.is_empty());
        assert_eq!(upstream, bridge::upstream_version());

        let version = take(termdown_version());
        assert!(version.starts_with("termdown-ffi v"));
        assert!(version.ends_with(&format!("(upstream {upstream})")));
    }
}
