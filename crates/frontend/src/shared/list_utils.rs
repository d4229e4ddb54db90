//! List helpers (grouping, sorting, distinct) and the search box used by list pages.

use leptos::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::Hash;
use std::ops::Range;

use crate::shared::hooks::debounce::use_debounced;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

/// Buckets items by key; items keep their relative order inside a bucket
pub fn group_by<T, K, F>(items: &[T], key: F) -> BTreeMap<K, Vec<T>>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item.clone());
    }
    groups
}

/// Stable sort on a copy
pub fn sort_by<T, K, F>(items: &[T], key: F, direction: SortDirection) -> Vec<T>
where
    T: Clone,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let cmp = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });
    sorted
}

/// First occurrence wins
pub fn distinct<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

/// Byte ranges of `text` matching `filter`, ignoring case.
///
/// Case folding runs per character, so a match always covers whole
/// characters of `text` even when lowercasing changes their length.
pub fn match_ranges(text: &str, filter: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = filter.trim().chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // (folded char, byte span of its source char, first of that source char)
    let mut folded: Vec<(char, Range<usize>, bool)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let span = start..start + c.len_utf8();
        for (i, lower) in c.to_lowercase().enumerate() {
            folded.push((lower, span.clone(), i == 0));
        }
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        let end = i + needle.len();
        let aligned = folded[i].2 && folded.get(end).map_or(true, |next| next.2);
        if aligned && folded[i..end].iter().map(|f| f.0).eq(needle.iter().copied()) {
            ranges.push(folded[i].1.start..folded[end - 1].1.end);
            i = end;
        } else {
            i += 1;
        }
    }
    ranges
}

/// Highlights case-insensitive matches of `filter` in `text`
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    for range in ranges {
        if range.start > last {
            parts.push(view! { <span>{text[last..range.start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-hit">{text[range.clone()].to_string()}</mark> }.into_any());
        last = range.end;
    }
    if last < text.len() {
        parts.push(view! { <span>{text[last..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Text shown in the box: the pending draft, else the published value
fn shown_text(draft: RwSignal<Option<String>>, value: RwSignal<String>) -> Signal<String> {
    Signal::derive(move || draft.get().unwrap_or_else(|| value.get()))
}

/// Publishes settled text; the draft is dropped once the box shows nothing newer
fn commit(draft: RwSignal<Option<String>>, value: RwSignal<String>, settled: Option<String>) {
    let Some(text) = settled else {
        return;
    };
    if value.get_untracked() != text {
        value.set(text.clone());
    }
    if draft.get_untracked().as_deref() == Some(text.as_str()) {
        draft.set(None);
    }
}

/// Search box; `value` receives the debounced text and outside writes to
/// `value` show up in the box
#[component]
pub fn SearchInput(
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(default = 300)] delay_ms: u32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Rechercher...".to_string()
    } else {
        placeholder
    };

    let draft = RwSignal::new(None::<String>);
    let shown = shown_text(draft, value);
    let settled = use_debounced(Signal::derive(move || draft.get()), delay_ms);

    Effect::new(move |_| commit(draft, value, settled.get()));

    view! {
        <div class="search-input">
            {crate::shared::icons::icon("search")}
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || shown.get()
                on:input=move |ev| draft.set(Some(event_target_value(&ev)))
            />
            <Show when=move || !shown.get().is_empty()>
                <button
                    class="search-input__clear"
                    title="Effacer"
                    on:click=move |_| {
                        draft.set(None);
                        value.set(String::new());
                    }
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        category: &'static str,
        price: f64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { category: "Joints", price: 8.75 },
            Row { category: "Roulements", price: 45.5 },
            Row { category: "Joints", price: 15.8 },
        ]
    }

    #[test]
    fn test_group_by() {
        let groups = group_by(&rows(), |r| r.category);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Joints"].len(), 2);
        assert_eq!(groups["Joints"][1].price, 15.8);
    }

    #[test]
    fn test_sort_by() {
        let asc = sort_by(&rows(), |r| r.price, SortDirection::Asc);
        assert_eq!(asc[0].price, 8.75);
        let desc = sort_by(&rows(), |r| r.price, SortDirection::Desc);
        assert_eq!(desc[0].price, 45.5);
        // stable for equal keys
        let by_cat = sort_by(&rows(), |r| r.category, SortDirection::Asc);
        assert_eq!(by_cat[0].price, 8.75);
        assert_eq!(by_cat[1].price, 15.8);
    }

    #[test]
    fn test_distinct() {
        assert_eq!(distinct(&["a", "b", "a", "c", "b"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::default().indicator(), " ▲");
    }

    #[test]
    fn test_match_ranges_ignore_case() {
        assert_eq!(match_ranges("Joint torique, JOINT plat", "joint"), vec![0..5, 15..20]);
        assert!(match_ranges("Roulement", "  ").is_empty());
        assert!(match_ranges("Roulement", "courroie").is_empty());
    }

    #[test]
    fn test_match_ranges_when_lowercasing_changes_length() {
        // KELVIN SIGN folds to a one-byte 'k', İ folds to two chars
        let text = "\u{212A}\u{130}\u{130} Roulement";
        let start = text.find("Roul").unwrap();
        let ranges = match_ranges(text, "roul");
        assert_eq!(ranges, vec![start..start + 4]);
        assert_eq!(&text[ranges[0].clone()], "Roul");

        assert_eq!(match_ranges("\u{212A}elvin", "kelvin"), vec![0..8]);
    }

    #[test]
    fn test_match_ranges_never_split_a_character() {
        // 'i' alone is only part of the folded İ
        assert!(match_ranges("\u{130}stanbul", "i").is_empty());
        assert_eq!(match_ranges("\u{130}stanbul", "i\u{307}s"), vec![0..3]);
    }

    #[test]
    fn test_search_box_follows_outside_writes() {
        Owner::new().with(|| {
            let value = RwSignal::new(String::new());
            let draft = RwSignal::new(None::<String>);
            let shown = shown_text(draft, value);

            value.set("pompe".to_string());
            assert_eq!(shown.get_untracked(), "pompe");

            draft.set(Some("roul".to_string()));
            assert_eq!(shown.get_untracked(), "roul");

            // typing moved on before the debounce settled
            draft.set(Some("roule".to_string()));
            commit(draft, value, Some("roul".to_string()));
            assert_eq!(value.get_untracked(), "roul");
            assert_eq!(shown.get_untracked(), "roule");

            commit(draft, value, Some("roule".to_string()));
            assert_eq!(value.get_untracked(), "roule");
            assert_eq!(draft.get_untracked(), None);

            value.set("joint".to_string());
            assert_eq!(shown.get_untracked(), "joint");
        });
    }
}
