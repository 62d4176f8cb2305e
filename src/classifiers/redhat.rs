//! The Red Hat classifier.
//! This module contains the classifier reading the CVE pages and the
//! RHSA pages of the Red Hat security website.

use log::{debug, trace, warn};
use regex::Regex;

use super::markup::Markup;
use super::{AdvisoryClassifier, PageVerdict};
use crate::models::Platform;

/// The text preceding the source packages in an RHSA.
const SRPMS_MARKER: &str = "SRPMS:";
/// The title of the statement section of a CVE page.
const STATEMENT_MARKER: &str = "Statement";
/// The text shown by the website for an unknown CVE.
const NOT_FOUND_MARKER: &str = "CVE not found";

/// A rule of the decision list. It returns a verdict when it applies.
type Rule = fn(&RedHatClassifier, &Markup) -> Option<PageVerdict>;

/// The Red Hat classifier
pub struct RedHatClassifier {
    /// The RHEL version advisories are searched for.
    /// Example: 5
    rhel_version: String,
    /// Matches the mention of an RHSA for the RHEL version.
    advisory_regex: Regex,
    /// The name of the anchor of the server variant in an RHSA.
    server_anchor: String,
}

impl RedHatClassifier {
    /// Creates the classifier for a RHEL version.
    /// By doing so, the regex is compiled once and the classifier can be
    /// reused.
    pub fn new(rhel_version: &str) -> Result<Self, regex::Error> {
        // Example: Red Hat Enterprise Linux version 5 (openssl)
        let advisory_regex = Regex::new(&format!(
            r".*Red Hat Enterprise Linux version {}.*",
            regex::escape(rhel_version)
        ))?;
        Ok(Self {
            rhel_version: rhel_version.to_string(),
            advisory_regex,
            server_anchor: format!("Red Hat Enterprise Linux (v. {} server)", rhel_version),
        })
    }

    /// The rules, in priority order. The first one giving a verdict wins.
    fn rules() -> [(&'static str, Rule); 3] {
        [
            ("advisory", Self::match_advisory),
            ("statement", Self::match_statement),
            ("not-found", Self::match_not_found),
        ]
    }

    /// An RHSA is mentioned for the RHEL version. The link following the
    /// mention leads to it.
    fn match_advisory(&self, markup: &Markup) -> Option<PageVerdict> {
        let mention = markup.find_text(|text| self.advisory_regex.is_match(text))?;
        let link = markup
            .find_next_element(mention, "a")
            .and_then(|position| markup.attr(position, "href"));
        match link {
            Some(link) => Some(PageVerdict::Advisory { link }),
            None => {
                warn!("An RHSA is mentioned but no link follows, considered as unresolved");
                Some(PageVerdict::Unresolved)
            }
        }
    }

    /// A statement is given in the paragraph after the "Statement" title.
    fn match_statement(&self, markup: &Markup) -> Option<PageVerdict> {
        let title = markup.find_exact_text(None, STATEMENT_MARKER)?;
        let fragments = match markup.find_next_element(title, "p") {
            Some(paragraph) => markup.text_fragments(paragraph),
            None => Vec::new(),
        };
        // The paragraph is wrapped in the source, keep it on a single line
        let text = fragments
            .iter()
            .flat_map(|fragment| fragment.split_whitespace())
            .collect::<Vec<&str>>()
            .join(" ");
        if text.is_empty() {
            warn!("A statement title is present but no statement follows, considered as unresolved");
            return Some(PageVerdict::Unresolved);
        }
        Some(PageVerdict::Statement { text })
    }

    fn match_not_found(&self, markup: &Markup) -> Option<PageVerdict> {
        markup
            .find_exact_text(None, NOT_FOUND_MARKER)
            .map(|_| PageVerdict::NotFound)
    }
}

impl AdvisoryClassifier for RedHatClassifier {
    /// Runs the rules over the CVE page.
    fn classify(&self, html: &str) -> PageVerdict {
        trace!("Running RedHatClassifier::classify()");
        let markup = Markup::parse(html);
        Self::rules()
            .iter()
            .find_map(|(name, rule)| {
                let verdict = rule(self, &markup);
                if verdict.is_some() {
                    debug!("Rule {} matches", name);
                }
                verdict
            })
            .unwrap_or(PageVerdict::Unresolved)
    }

    /// Reads the source package of the server variant and turns it into
    /// the binary package of the platform.
    fn extract_package(&self, html: &str, platform: Platform) -> Option<String> {
        trace!("Running RedHatClassifier::extract_package()");
        let markup = Markup::parse(html);
        let Some(anchor) = markup.find_element_with_attr("a", "name", &self.server_anchor) else {
            warn!("Anchor \"{}\" not found in the RHSA", self.server_anchor);
            return None;
        };
        let Some(marker) = markup.find_exact_text(Some(anchor), SRPMS_MARKER) else {
            warn!("No {} after the anchor \"{}\"", SRPMS_MARKER, self.server_anchor);
            return None;
        };
        let package = markup
            .find_next_element(marker, "td")
            .and_then(|cell| markup.first_child_text(cell))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        match package {
            // Example: openssl-0.9.8e-12.el5.src.rpm -> openssl-0.9.8e-12.el5.x86_64.rpm
            Some(package) => Some(package.replace(".src.", &format!(".{}.", platform))),
            None => {
                warn!("No source package after {}", SRPMS_MARKER);
                None
            }
        }
    }

    fn distribution_version(&self) -> &str {
        &self.rhel_version
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const ADVISORY_PAGE: &str = r#"<html><body>
        <h1>CVE-2010-0742</h1>
        <h3>Statement</h3>
        <p>This issue affected OpenSSL 0.9.8.</p>
        <table>
          <tr><th>Platform</th><th>Errata</th></tr>
          <tr><td>Red Hat Enterprise Linux version 4 (openssl)</td><td><a href="https://rhn.redhat.com/errata/RHSA-2010-0163.html">RHSA-2010:0163</a></td></tr>
          <tr><td>Red Hat Enterprise Linux version 5 (openssl)</td><td><a href="https://rhn.redhat.com/errata/RHSA-2010-0162.html">RHSA-2010:0162</a></td></tr>
        </table>
    </body></html>"#;

    pub(crate) const RHSA_PAGE: &str = r#"<html><body>
        <h2>Updated packages</h2>
        <a name="Red Hat Enterprise Linux (v. 4)"></a>
        <table>
          <tr><td>SRPMS:</td></tr>
          <tr><td>openssl-0.9.7a-43.17.el4.src.rpm</td></tr>
        </table>
        <a name="Red Hat Enterprise Linux (v. 5 server)"></a>
        <table>
          <tr><td>SRPMS:</td></tr>
          <tr><td>openssl-0.9.8e-12.el5_4.6.src.rpm<br/>File outdated by: RHSA-2010:0888</td></tr>
          <tr><td>i386:</td></tr>
        </table>
    </body></html>"#;

    pub(crate) const STATEMENT_PAGE: &str = r#"<html><body>
        <h1>CVE-2009-3555</h1>
        <h3>Statement</h3>
        <p>Red Hat does not plan to fix this issue in
           <b>Red Hat Enterprise Linux 3</b>. It is not
           considered a security risk.</p>
        <p>Another paragraph.</p>
    </body></html>"#;

    pub(crate) const NOT_FOUND_PAGE: &str = r#"<html><body>
        <div class="error"><h2>CVE not found</h2></div>
    </body></html>"#;

    pub(crate) const EMPTY_PAGE: &str = r#"<html><body>
        <h1>CVE-2012-0001</h1>
        <p>Red Hat Enterprise Linux version 6 (kernel)</p>
    </body></html>"#;

    #[test]
    fn advisory_wins_over_statement() {
        let classifier = RedHatClassifier::new("5").unwrap();
        assert_eq!(
            PageVerdict::Advisory {
                link: "https://rhn.redhat.com/errata/RHSA-2010-0162.html".to_string()
            },
            classifier.classify(ADVISORY_PAGE)
        );
    }

    #[test]
    fn advisory_depends_on_the_version() {
        let classifier = RedHatClassifier::new("4").unwrap();
        assert_eq!(
            PageVerdict::Advisory {
                link: "https://rhn.redhat.com/errata/RHSA-2010-0163.html".to_string()
            },
            classifier.classify(ADVISORY_PAGE)
        );
        // No advisory for RHEL 6, so the statement is used
        let classifier = RedHatClassifier::new("6").unwrap();
        assert!(matches!(
            classifier.classify(ADVISORY_PAGE),
            PageVerdict::Statement { .. }
        ));
    }

    #[test]
    fn statement_is_on_a_single_line() {
        let classifier = RedHatClassifier::new("5").unwrap();
        assert_eq!(
            PageVerdict::Statement {
                text: "Red Hat does not plan to fix this issue in Red Hat Enterprise Linux 3 . It is not considered a security risk.".to_string()
            },
            classifier.classify(STATEMENT_PAGE)
        );
    }

    #[test]
    fn statement_without_paragraph_is_unresolved() {
        let classifier = RedHatClassifier::new("5").unwrap();
        let page = r#"<h3>Statement</h3><div>not a paragraph</div>"#;
        assert_eq!(PageVerdict::Unresolved, classifier.classify(page));
        let page = r#"<h3>Statement</h3><p>   </p>"#;
        assert_eq!(PageVerdict::Unresolved, classifier.classify(page));
    }

    #[test]
    fn not_found_marker() {
        let classifier = RedHatClassifier::new("5").unwrap();
        assert_eq!(PageVerdict::NotFound, classifier.classify(NOT_FOUND_PAGE));
    }

    #[test]
    fn falls_back_to_unresolved() {
        let classifier = RedHatClassifier::new("5").unwrap();
        assert_eq!(PageVerdict::Unresolved, classifier.classify(EMPTY_PAGE));
        assert_eq!(PageVerdict::Unresolved, classifier.classify(""));
    }

    #[test]
    fn advisory_without_link_is_unresolved() {
        let classifier = RedHatClassifier::new("5").unwrap();
        let page = r#"<p>Red Hat Enterprise Linux version 5 (bash)</p><h3>Statement</h3><p>text</p>"#;
        assert_eq!(PageVerdict::Unresolved, classifier.classify(page));
    }

    #[test]
    fn version_is_not_a_regex() {
        let classifier = RedHatClassifier::new("5.").unwrap();
        let page = r#"<p>Red Hat Enterprise Linux version 56</p><a href="x">x</a>"#;
        assert_eq!(PageVerdict::Unresolved, classifier.classify(page));
    }

    #[test]
    fn extracts_package_for_platform() {
        let classifier = RedHatClassifier::new("5").unwrap();
        assert_eq!(
            Some("openssl-0.9.8e-12.el5_4.6.x86_64.rpm".to_string()),
            classifier.extract_package(RHSA_PAGE, Platform::X86_64)
        );
        assert_eq!(
            Some("openssl-0.9.8e-12.el5_4.6.i386.rpm".to_string()),
            classifier.extract_package(RHSA_PAGE, Platform::I386)
        );
    }

    #[test]
    fn missing_anchor_gives_no_package() {
        let classifier = RedHatClassifier::new("6").unwrap();
        assert!(classifier.extract_package(RHSA_PAGE, Platform::X86_64).is_none());
    }

    #[test]
    fn missing_marker_gives_no_package() {
        let classifier = RedHatClassifier::new("5").unwrap();
        let page = r#"<a name="Red Hat Enterprise Linux (v. 5 server)"></a><table><tr><td>x86_64:</td></tr></table>"#;
        assert!(classifier.extract_package(page, Platform::X86_64).is_none());
    }

    #[test]
    fn empty_cell_gives_no_package() {
        let classifier = RedHatClassifier::new("5").unwrap();
        let page = r#"<a name="Red Hat Enterprise Linux (v. 5 server)"></a><table><tr><td>SRPMS:</td></tr><tr><td><b>bold</b></td></tr></table>"#;
        assert!(classifier.extract_package(page, Platform::X86_64).is_none());
    }
}
