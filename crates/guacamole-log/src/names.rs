//! Display-name derivation: abbreviation, type-path normalization and padding.

/// Abbreviates a dot-separated class identifier by reducing every package
/// segment to its first character.
///
/// `com.badlogic.gdx.graphics.g2d.Sprite` becomes `c.b.g.g.g.Sprite`. An
/// identifier without dots is returned unchanged.
pub fn abbreviate(identifier: &str) -> String {
    let Some((packages, last)) = identifier.rsplit_once('.') else {
        return identifier.to_owned();
    };

    let mut out = String::with_capacity(packages.len() / 2 + last.len() + 1);
    for segment in packages.split('.') {
        // Empty segments (`a..b`) keep their slot so the segment count holds.
        if let Some(c) = segment.chars().next() {
            out.push(c);
        }
        out.push('.');
    }
    out.push_str(last);
    out
}

/// Converts a Rust type path (as returned by [`std::any::type_name`]) to
/// dot form.
///
/// References, raw pointers and `dyn` are peeled off, then the generic
/// parameter list and any `+ Send`-style bounds are dropped, so
/// `&alloc::vec::Vec<u8>` becomes `alloc.vec.Vec`. Tuples, slices and arrays
/// keep their shape: `(a::B, c::D)` becomes `(a.B, c.D)`.
pub fn full_type_name(type_name: &str) -> String {
    let bare = strip_indirection(type_name.trim());
    if is_composite(bare) {
        return bare.replace("::", ".");
    }

    let outer = match bare.find(&['<', ' ', '+'][..]) {
        Some(idx) => &bare[..idx],
        None => bare,
    };
    outer.replace("::", ".")
}

/// Same as [`full_type_name`] followed by [`abbreviate`]. Every path inside
/// a tuple, slice or array is abbreviated on its own.
pub fn abbreviate_type_name(type_name: &str) -> String {
    let full = full_type_name(type_name);
    if !is_composite(&full) {
        return abbreviate(&full);
    }

    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == '.' {
            path.push(c);
        } else {
            out.push_str(&abbreviate(&path));
            path.clear();
            out.push(c);
        }
    }
    out.push_str(&abbreviate(&path));
    out
}

fn strip_indirection(mut name: &str) -> &str {
    const PREFIXES: [&str; 5] = ["&mut ", "&", "*const ", "*mut ", "dyn "];
    while let Some(rest) = PREFIXES.iter().find_map(|p| name.strip_prefix(*p)) {
        name = rest.trim_start();
    }
    name
}

fn is_composite(name: &str) -> bool {
    name.starts_with('(') || name.starts_with('[')
}

/// Left-justifies `name` to at least `min_width` characters and shortens it
/// to at most `max_width` characters.
///
/// Shortening drops whole leading package segments first (`c.e.r.Batcher`
/// → `r.Batcher` → `Batcher`). If the last segment alone is still too long
/// it is cut after `max_width` characters, like a `%-N.Ns` specifier. A
/// width of `0` disables the respective bound.
pub fn fit_width(name: &str, min_width: usize, max_width: usize) -> String {
    let mut name = name;
    if max_width > 0 {
        while name.chars().count() > max_width {
            match name.split_once('.') {
                Some((_, rest)) => name = rest,
                None => break,
            }
        }
    }

    let mut out: String = match max_width {
        0 => name.to_owned(),
        max => name.chars().take(max).collect(),
    };

    let len = out.chars().count();
    if len < min_width {
        out.extend(std::iter::repeat_n(' ', min_width - len));
    }
    out
}
