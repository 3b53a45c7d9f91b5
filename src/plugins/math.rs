//! LaTeX math support

use pulldown_cmark::Options;

use crate::extension::ExtensionDescriptor;
use crate::highlight::{rules_from, HighlightRule};
use crate::markdown::MarkupRule;

/// Editor highlighting for LaTeX inside the composite language
///
/// Command names must not run on into letters or digits (`\sum_i` is a
/// `func`, `\summa` is not); the `token` group keeps the following
/// character out of the span.
pub fn latex_rules() -> Vec<HighlightRule> {
    rules_from(&[
        (
            r"(?P<token>\\(?:frac|tfrac|dfrac|sqrt|over|above|cfrac|binom|dbinom|brace|choose|tbinom|brack))(?:[^a-zA-Z0-9]|$)",
            "str",
        ),
        (
            r"(?P<token>\\(?:amalg|circledast|ldotp|rtimes|And|circledcirc|lor|setminus|ast|circleddash|lessdot|smallsetminus|barwedge|Cup|lhd|sqcap|bigcirc|cup|ltimes|sqcup|bmod|curlyvee|moda|times|boxdot|curlywedge|mp|unlhd|boxminus|div|odot|unrhd|boxplus|divideontimes|ominus|uplus|boxtimes|dotplus|oplus|vee|bullet|doublebarwedge|otimes|veebar|Cap|doublecap|oslash|wedge|cap|doublecup|pmod|plusmn|wr|centerdot|land|rhd|circ|leftthreetimes|rightthreetimes|cdot|gtrdot|cdotp|intercal|pod|mod))(?:[^a-zA-Z0-9]|$)",
            "class",
        ),
        (
            r"(?P<token>\\(?:mathscr|mathrm|mathbf|mathit|mathnormal|textbf|textit|textrm|bf|it|rm|bold|textup|textnormal|boldsymbol|Bbb|text|bm|mathbb|mathsf|textmd|frak|textsf|mathtt|mathfrak|sf|texttt|mathcal|tt|cal))(?:[^a-zA-Z0-9]|$)",
            "insert",
        ),
        (
            r"(?P<token>\\(?:sum|prod|bigotimes|bigvee|int|coprod|bigoplus|bigwedge|iint|intop|bigodot|bigcap|iiint|smallint|biguplus|bigcup|oint|oiint|oiiint|bigsqcup))(?:[^a-zA-Z0-9]|$)",
            "func",
        ),
        (r"\\[a-zA-Z0-9]+", "oper"),
        (r"[(){}\[\]]", "esc"),
        (r"[a-zA-Z]+", "var"),
        (r"[0-9]+", "num"),
    ])
}

/// Extension enabling `$inline$` and `$$display$$` math
///
/// Math is emitted as pulldown-cmark's `math-inline` / `math-display`
/// spans; typesetting is left to the page.
pub fn math() -> ExtensionDescriptor {
    ExtensionDescriptor::new("math")
        .markup_rule(MarkupRule::options("math", Options::ENABLE_MATH))
        .highlight_rules(latex_rules())
}
