//! Tag and attribute rename tables for each target.
//!
//! Reference: React's `possibleStandardNames` (SVG section) and the
//! component exports of `react-native-svg`.

use smol_str::SmolStr;

/// SVG attribute names that React DOM expects in camelCase.
pub static REACT_DOM_ATTRIBUTES: &[(&str, &str)] = &[
    ("accent-height", "accentHeight"),
    ("alignment-baseline", "alignmentBaseline"),
    ("arabic-form", "arabicForm"),
    ("baseline-shift", "baselineShift"),
    ("cap-height", "capHeight"),
    ("class", "className"),
    ("clip-path", "clipPath"),
    ("clip-rule", "clipRule"),
    ("color-interpolation", "colorInterpolation"),
    ("color-interpolation-filters", "colorInterpolationFilters"),
    ("color-profile", "colorProfile"),
    ("color-rendering", "colorRendering"),
    ("crossorigin", "crossOrigin"),
    ("dominant-baseline", "dominantBaseline"),
    ("enable-background", "enableBackground"),
    ("fill-opacity", "fillOpacity"),
    ("fill-rule", "fillRule"),
    ("flood-color", "floodColor"),
    ("flood-opacity", "floodOpacity"),
    ("font-family", "fontFamily"),
    ("font-size", "fontSize"),
    ("font-size-adjust", "fontSizeAdjust"),
    ("font-stretch", "fontStretch"),
    ("font-style", "fontStyle"),
    ("font-variant", "fontVariant"),
    ("font-weight", "fontWeight"),
    ("glyph-name", "glyphName"),
    ("glyph-orientation-horizontal", "glyphOrientationHorizontal"),
    ("glyph-orientation-vertical", "glyphOrientationVertical"),
    ("horiz-adv-x", "horizAdvX"),
    ("horiz-origin-x", "horizOriginX"),
    ("image-rendering", "imageRendering"),
    ("letter-spacing", "letterSpacing"),
    ("lighting-color", "lightingColor"),
    ("marker-end", "markerEnd"),
    ("marker-mid", "markerMid"),
    ("marker-start", "markerStart"),
    ("overline-position", "overlinePosition"),
    ("overline-thickness", "overlineThickness"),
    ("paint-order", "paintOrder"),
    ("panose-1", "panose1"),
    ("pointer-events", "pointerEvents"),
    ("rendering-intent", "renderingIntent"),
    ("shape-rendering", "shapeRendering"),
    ("stop-color", "stopColor"),
    ("stop-opacity", "stopOpacity"),
    ("strikethrough-position", "strikethroughPosition"),
    ("strikethrough-thickness", "strikethroughThickness"),
    ("stroke-dasharray", "strokeDasharray"),
    ("stroke-dashoffset", "strokeDashoffset"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("stroke-miterlimit", "strokeMiterlimit"),
    ("stroke-opacity", "strokeOpacity"),
    ("stroke-width", "strokeWidth"),
    ("tabindex", "tabIndex"),
    ("text-anchor", "textAnchor"),
    ("text-decoration", "textDecoration"),
    ("text-rendering", "textRendering"),
    ("underline-position", "underlinePosition"),
    ("underline-thickness", "underlineThickness"),
    ("unicode-bidi", "unicodeBidi"),
    ("unicode-range", "unicodeRange"),
    ("units-per-em", "unitsPerEm"),
    ("v-alphabetic", "vAlphabetic"),
    ("v-hanging", "vHanging"),
    ("v-ideographic", "vIdeographic"),
    ("v-mathematical", "vMathematical"),
    ("vector-effect", "vectorEffect"),
    ("vert-adv-y", "vertAdvY"),
    ("vert-origin-x", "vertOriginX"),
    ("vert-origin-y", "vertOriginY"),
    ("word-spacing", "wordSpacing"),
    ("writing-mode", "writingMode"),
    ("x-height", "xHeight"),
    ("xlink:actuate", "xlinkActuate"),
    ("xlink:arcrole", "xlinkArcrole"),
    ("xlink:href", "xlinkHref"),
    ("xlink:role", "xlinkRole"),
    ("xlink:show", "xlinkShow"),
    ("xlink:title", "xlinkTitle"),
    ("xlink:type", "xlinkType"),
    ("xml:base", "xmlBase"),
    ("xml:lang", "xmlLang"),
    ("xml:space", "xmlSpace"),
    ("xmlns:xlink", "xmlnsXlink"),
];

/// SVG elements supported by `react-native-svg`, with their component names.
pub static REACT_NATIVE_SVG_ELEMENTS: &[(&str, &str)] = &[
    ("circle", "Circle"),
    ("clipPath", "ClipPath"),
    ("defs", "Defs"),
    ("ellipse", "Ellipse"),
    ("feBlend", "FeBlend"),
    ("feColorMatrix", "FeColorMatrix"),
    ("feComposite", "FeComposite"),
    ("feFlood", "FeFlood"),
    ("feGaussianBlur", "FeGaussianBlur"),
    ("feMerge", "FeMerge"),
    ("feMergeNode", "FeMergeNode"),
    ("feOffset", "FeOffset"),
    ("filter", "Filter"),
    ("foreignObject", "ForeignObject"),
    ("g", "G"),
    ("image", "Image"),
    ("line", "Line"),
    ("linearGradient", "LinearGradient"),
    ("marker", "Marker"),
    ("mask", "Mask"),
    ("path", "Path"),
    ("pattern", "Pattern"),
    ("polygon", "Polygon"),
    ("polyline", "Polyline"),
    ("radialGradient", "RadialGradient"),
    ("rect", "Rect"),
    ("stop", "Stop"),
    ("svg", "Svg"),
    ("symbol", "Symbol"),
    ("text", "Text"),
    ("textPath", "TextPath"),
    ("tspan", "TSpan"),
    ("use", "Use"),
];

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
}

/// Renames an attribute for React DOM.
///
/// Names missing from [`REACT_DOM_ATTRIBUTES`] are kept, except that a
/// namespace separator is folded into a capitalized continuation
/// (`xmlns:dc` → `xmlnsDc`).
pub fn react_dom_attribute(name: &str) -> SmolStr {
    if let Some(mapped) = lookup(REACT_DOM_ATTRIBUTES, name) {
        return SmolStr::new_static(mapped);
    }
    if name.contains(':') {
        return fold_namespace(name).into();
    }
    SmolStr::new(name)
}

/// Renames an attribute for Preact, or drops it.
///
/// Preact takes SVG attribute names verbatim; namespaced names other than
/// `xlink:href` have no representation and return `None`.
pub fn preact_attribute(name: &str) -> Option<SmolStr> {
    if name == "xlink:href" {
        Some(SmolStr::new_static("href"))
    } else if name.contains(':') {
        None
    } else {
        Some(SmolStr::new(name))
    }
}

/// Returns the `react-native-svg` component for an SVG tag, if it has one.
pub fn react_native_svg_element(tag: &str) -> Option<&'static str> {
    lookup(REACT_NATIVE_SVG_ELEMENTS, tag)
}

fn fold_namespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == ':' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
