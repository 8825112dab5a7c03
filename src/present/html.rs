// Single-page HTML renderer for the web UI
use super::metric;
use crate::dispatch::{AnalysisRequest, Feature, Outcome};
use crate::nlp::sentiment::SentimentLabel;
use crate::nlp::SummarizerKind;

const STYLE: &str = r#"
body { margin: 0; font-family: 'Segoe UI', sans-serif; color: #f1f1f1;
  background: linear-gradient(135deg, #0f172a 0%, #1e293b 50%, #3e2723 100%); min-height: 100vh; }
.layout { display: flex; min-height: 100vh; }
aside { width: 260px; padding: 24px; background: linear-gradient(180deg, #1e293b, #3e2723); }
aside h2 { color: #fbbf24; }
main { flex: 1; padding: 32px 48px; }
.main-title { text-align: center; color: #fbbf24; font-size: 2.6rem; font-weight: 800;
  text-shadow: 0 0 10px rgba(251, 191, 36, 0.6); margin-bottom: 0; }
.sub-title { text-align: center; color: #d1d5db; font-size: 1.2rem; margin-bottom: 25px; }
.card { background-color: rgba(255, 255, 255, 0.05); padding: 25px; border-radius: 16px;
  box-shadow: 0 6px 20px rgba(0, 0, 0, 0.4); margin-bottom: 25px; }
textarea, select { width: 100%; box-sizing: border-box; background-color: rgba(255, 255, 255, 0.08);
  color: #f9fafb; border-radius: 10px; border: 1.5px solid #8b5e3c; font-size: 1rem; padding: 8px; }
option { color: #111827; }
label { font-weight: 600; display: block; margin: 12px 0 6px; }
button { margin-top: 16px; background: linear-gradient(90deg, #1e3a8a, #3b82f6); color: white;
  border: none; border-radius: 10px; padding: 0.7rem 1.5rem; font-size: 1.05rem; font-weight: 600; cursor: pointer; }
button:hover { background: linear-gradient(90deg, #3b82f6, #60a5fa); }
details summary { font-weight: 600; color: #fbbf24; cursor: pointer; }
table { border-collapse: collapse; width: 100%; background-color: rgba(255, 255, 255, 0.05); }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid rgba(255, 255, 255, 0.1); }
.metric { display: inline-block; margin-right: 40px; }
.metric .value { color: #fbbf24; font-size: 2rem; }
.banner { padding: 12px 16px; border-radius: 10px; margin: 12px 0; font-weight: 600; }
.success { background: rgba(34, 197, 94, 0.2); }
.warning { background: rgba(234, 179, 8, 0.2); }
.error { background: rgba(239, 68, 68, 0.25); }
.tip { background: rgba(59, 130, 246, 0.2); padding: 10px; border-radius: 10px; }
button:disabled { opacity: 0.6; cursor: wait; }
.busy { margin-top: 12px; color: #fbbf24; font-weight: 600; }
.spinner { display: inline-block; width: 14px; height: 14px; margin-right: 8px; vertical-align: middle;
  border: 3px solid rgba(251, 191, 36, 0.3); border-top-color: #fbbf24; border-radius: 50%;
  animation: spin 0.8s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
footer { text-align: center; color: #d1d5db; font-size: 0.9rem; padding-top: 20px; }
"#;

const PAGE_SCRIPT: &str = r#"
const feature = document.getElementById('feature');
const method = document.getElementById('method');
const sync = () => { method.style.display = feature.value === 'summarize' ? 'block' : 'none'; };
feature.addEventListener('change', sync);
sync();
document.getElementById('analysis').addEventListener('submit', () => {
  document.getElementById('run').disabled = true;
  document.getElementById('busy').hidden = false;
});
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whole page: the form pre-filled from `request`, plus the result if any.
pub fn render_page(request: &AnalysisRequest, outcome: Option<&Outcome>) -> String {
    let mut page = format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>NLPiffy</title><style>{STYLE}</style></head><body><div class=\"layout\">"
    );

    page.push_str("<aside><h2>Configuration</h2>");
    page.push_str("<label for=\"feature\">Choose an NLP Feature</label>");
    page.push_str("<select id=\"feature\" name=\"feature\" form=\"analysis\">");
    for feature in Feature::ALL {
        page.push_str(&option(
            feature.key(),
            feature.title(),
            feature == request.feature,
        ));
    }
    page.push_str("</select>");
    page.push_str("<div id=\"method\"><label for=\"summarizer\">Choose a summarizer</label>");
    page.push_str("<select id=\"summarizer\" name=\"summarizer\" form=\"analysis\">");
    for (value, kind) in [("lexrank", SummarizerKind::LexRank), ("lsa", SummarizerKind::Lsa)] {
        page.push_str(&option(value, kind.display_name(), kind == request.summarizer));
    }
    page.push_str("</select></div>");
    page.push_str(
        "<p class=\"tip\">Tip: Paste a paragraph or an article for better results.</p></aside>",
    );

    page.push_str("<main><h1 class=\"main-title\">NLPiffy</h1>");
    page.push_str(
        "<p class=\"sub-title\">Your Modern Natural Language Processing Playground</p><hr>",
    );
    page.push_str(
        "<details><summary>About this App</summary><p>NLPiffy performs common Natural \
         Language Processing tasks on the text you provide:</p><ul>\
         <li>Tokenization &amp; Lemmatization</li><li>Named Entity Recognition (NER)</li>\
         <li>Sentiment Analysis</li><li>Text Summarization (LexRank / LSA)</li></ul></details>",
    );

    page.push_str(&format!(
        "<form id=\"analysis\" method=\"post\" action=\"/\" class=\"card\">\
         <label for=\"text\">Enter Text to Analyze</label>\
         <textarea id=\"text\" name=\"text\" rows=\"9\" \
         placeholder=\"Type or paste your text here...\">{}</textarea>\
         <button id=\"run\" type=\"submit\">Run Analysis</button>\
         <div id=\"busy\" class=\"busy\" hidden><span class=\"spinner\"></span>\
         Processing your text...</div></form>",
        escape(&request.text)
    ));

    if let Some(outcome) = outcome {
        page.push_str("<section class=\"card\">");
        render_outcome(&mut page, outcome);
        page.push_str("</section>");
    }

    page.push_str(&format!(
        "<footer>NLPiffy v{}</footer></main></div><script>{PAGE_SCRIPT}</script></body></html>",
        env!("CARGO_PKG_VERSION")
    ));
    page
}

/// Page shown when an analysis fails.
pub fn render_error_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>NLPiffy - error</title><style>{STYLE}</style></head><body><main>\
         <h1 class=\"main-title\">NLPiffy</h1><div class=\"banner error\">{}</div>\
         <p><a href=\"/\" style=\"color:#fbbf24\">Back</a></p></main></body></html>",
        escape(message)
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!("<option value=\"{value}\"{selected}>{}</option>", escape(label))
}

fn render_outcome(page: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::EmptyInput => banner(page, "warning", Outcome::EMPTY_INPUT_MESSAGE),
        Outcome::Tokens { tokens } => {
            page.push_str("<h3>Tokenization &amp; Lemmatization</h3>");
            table(
                page,
                ["Token", "Lemma"],
                tokens.iter().map(|t| [t.text.as_str(), t.lemma.as_str()]),
            );
        }
        Outcome::Entities { entities, count } => {
            page.push_str("<h3>Named Entity Recognition</h3>");
            table(
                page,
                ["Entity", "Label"],
                entities.iter().map(|e| [e.text.as_str(), e.label.as_str()]),
            );
            banner(page, "success", &format!("Total Entities Found: {count}"));
        }
        Outcome::Sentiment {
            polarity,
            subjectivity,
            label,
        } => {
            page.push_str("<h3>Sentiment Analysis</h3>");
            for (name, value) in [("Polarity", polarity), ("Subjectivity", subjectivity)] {
                page.push_str(&format!(
                    "<div class=\"metric\"><div>{name}</div><div class=\"value\">{}</div></div>",
                    metric(*value)
                ));
            }
            let class = match label {
                SentimentLabel::Positive => "success",
                SentimentLabel::Negative => "error",
                SentimentLabel::Neutral => "warning",
            };
            banner(page, class, &format!("{label} Sentiment"));
        }
        Outcome::Summary { method, sentences } => {
            page.push_str(&format!(
                "<h3>Text Summarization ({})</h3>",
                method.display_name()
            ));
            if sentences.is_empty() {
                banner(page, "warning", "No sentences found to summarize.");
            } else {
                banner(page, "success", "Summary Generated:");
                page.push_str(&format!(
                    "<p><strong>{}</strong></p>",
                    escape(&Outcome::summary_text(sentences))
                ));
            }
        }
    }
}

fn banner(page: &mut String, class: &str, message: &str) {
    page.push_str(&format!(
        "<div class=\"banner {class}\">{}</div>",
        escape(message)
    ));
}

fn table<'a>(page: &mut String, header: [&str; 2], rows: impl Iterator<Item = [&'a str; 2]>) {
    page.push_str(&format!(
        "<table><thead><tr><th>{}</th><th>{}</th></tr></thead><tbody>",
        header[0], header[1]
    ));
    for [left, right] in rows {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(left),
            escape(right)
        ));
    }
    page.push_str("</tbody></table>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::TokenRecord;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_page_without_result_has_form_and_about() {
        let page = render_page(&AnalysisRequest::default(), None);
        assert!(page.contains("<form id=\"analysis\""));
        assert!(page.contains("About this App"));
        assert!(page.contains("<option value=\"summarize\">Text Summarization</option>"));
        assert!(!page.contains("<section"));
    }

    #[test]
    fn test_page_has_busy_indicator() {
        let page = render_page(&AnalysisRequest::default(), None);
        assert!(page.contains("<div id=\"busy\" class=\"busy\" hidden>"));
        assert!(page.contains("Processing your text..."));
        assert!(page.contains("addEventListener('submit'"));
    }

    #[test]
    fn test_page_keeps_selection_and_escapes_text() {
        let request = AnalysisRequest {
            text: "<script>alert(1)</script>".into(),
            feature: Feature::Summarize,
            summarizer: SummarizerKind::Lsa,
        };
        let page = render_page(&request, Some(&Outcome::EmptyInput));
        assert!(page.contains("<option value=\"summarize\" selected>"));
        assert!(page.contains("<option value=\"lsa\" selected>LSA</option>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("Please enter some text to analyze!"));
    }

    #[test]
    fn test_token_rows() {
        let page = render_page(
            &AnalysisRequest::default(),
            Some(&Outcome::Tokens {
                tokens: vec![TokenRecord {
                    text: "R&D".into(),
                    lemma: "R&D".into(),
                }],
            }),
        );
        assert!(page.contains("<tr><td>R&amp;D</td><td>R&amp;D</td></tr>"));
    }

    #[test]
    fn test_sentiment_banner_class() {
        let page = render_page(
            &AnalysisRequest::default(),
            Some(&Outcome::Sentiment {
                polarity: -0.25,
                subjectivity: 0.5,
                label: SentimentLabel::Negative,
            }),
        );
        assert!(page.contains("<div class=\"value\">-0.250</div>"));
        assert!(page.contains("<div class=\"banner error\">Negative Sentiment</div>"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = render_error_page("bad <input>");
        assert!(page.contains("bad &lt;input&gt;"));
    }
}
