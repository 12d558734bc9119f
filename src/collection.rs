//! Helpers over collections and slices
//!
//! Absent (`None`) and empty inputs are treated as "no data": they never
//! produce errors, only `None`, `false` or an empty string.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::io::Write;

use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::DEFAULT_DELIMITER;
use crate::settings::Settings;

/// Anything that can be absent or have zero elements
pub trait Blank {
    fn is_blank(&self) -> bool;

    fn is_not_blank(&self) -> bool {
        !self.is_blank()
    }
}

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Blank for [T; N] {
    fn is_blank(&self) -> bool {
        N == 0
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for VecDeque<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Blank for HashSet<T, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for BTreeSet<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Blank for HashMap<K, V, S> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<C: Blank + ?Sized> Blank for &C {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<C: Blank> Blank for Option<C> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_none_or(Blank::is_blank)
    }
}

/// True when `items` is absent or empty
pub fn is_blank<C: Blank + ?Sized>(items: Option<&C>) -> bool {
    items.is_none_or(Blank::is_blank)
}

/// True when `items` is present and has at least one element
pub fn is_not_blank<C: Blank + ?Sized>(items: Option<&C>) -> bool {
    !is_blank(items)
}

/// Join the string forms of `items` with `delimiter`.
///
/// A `None` or empty delimiter means [`DEFAULT_DELIMITER`]. With
/// `trim_contents` every element's string form is trimmed first. The result
/// never ends with a delimiter, and absent or empty input yields `""`.
pub fn get_content_as_string<T: Display>(
    items: Option<&[T]>,
    delimiter: Option<&str>,
    trim_contents: bool,
) -> String {
    let Some(items) = items.filter(|items| !items.is_empty()) else {
        return String::new();
    };
    let delimiter = delimiter
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DELIMITER);

    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(delimiter);
        }
        let text = item.to_string();
        if trim_contents {
            out.push_str(text.trim());
        } else {
            out.push_str(&text);
        }
    }
    out
}

/// [`get_content_as_string`] with the default delimiter and trimming on
pub fn content_as_string<T: Display>(items: Option<&[T]>) -> String {
    get_content_as_string(items, None, true)
}

/// [`get_content_as_string`] with the default delimiter
pub fn content_as_string_trimmed<T: Display>(items: Option<&[T]>, trim_contents: bool) -> String {
    get_content_as_string(items, None, trim_contents)
}

/// [`get_content_as_string`] using the delimiter and trimming from `settings`
pub fn content_as_string_with<T: Display>(items: Option<&[T]>, settings: &Settings) -> String {
    get_content_as_string(
        items,
        Some(settings.effective_delimiter()),
        settings.trim_contents,
    )
}

/// Pick a uniformly random element, or `None` for absent/empty input
pub fn get_random_object<I, R>(items: Option<I>, rng: &mut R) -> Option<I::Item>
where
    I: IntoIterator,
    R: Rng + ?Sized,
{
    items?.into_iter().choose(rng)
}

/// [`get_random_object`] drawing from the thread-local generator
pub fn get_random_object_default<I: IntoIterator>(items: Option<I>) -> Option<I::Item> {
    get_random_object(items, &mut rand::rng())
}

/// Deterministic generator for reproducible selections
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Last element of an ordered sequence
pub fn get_last_object<T>(items: Option<&[T]>) -> Option<&T> {
    items?.last()
}

/// Write each element's string form on its own line
pub fn write_content<T: Display, W: Write + ?Sized>(
    items: Option<&[T]>,
    out: &mut W,
) -> std::io::Result<()> {
    for item in items.unwrap_or_default() {
        writeln!(out, "{}", item)?;
    }
    Ok(())
}

/// Print each element to stdout, one per line
pub fn print_content_to_console<T: Display>(items: Option<&[T]>) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_content(items, &mut lock)?;
    lock.flush()
}
