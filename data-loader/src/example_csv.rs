//! Sample Opportunity input, handed out as a template for new uploads.

use std::io::Write;

/// File name suggested for the sample.
pub const EXAMPLE_CSV_FILE_NAME: &str = "example.csv";

/// Header row plus two Opportunity rows in the accepted format.
pub const EXAMPLE_CSV: &str = concat!(
    "ID;title;url;author;institutionName;institutionUrl;helix;role;expertise;description;appendixUrl\n",
    "1;Opportunity 1 title;https://linkToTheCrowdhelixOpportunity.com;John Doe;Some institute name;",
    "https://linkToTheInstitutionUrl.com;Health, Vascular, Mission Cancer;",
    "Work Package Leader, Consortium Partner;",
    "Hepatology, Cardiovascular, Clinical research, Clinical trial, Cns;",
    "Some lengthy annotation;https://linkToTheAttachmentUrl.com\n",
    "2;Opportunity 2 title;https://linkToTheCrowdhelixOpportunity.com;Jenna Doe;Some institute name;",
    "https://linkToTheInstitutionUrl.com;Health, Mission Cancer;Consortium Partner;",
    "Clinical research, Clinical trial, Cns;Some lengthy annotation 2;\n",
);

/// Write the sample to `out`.
pub fn write_example_csv<W: Write>(mut out: W) -> std::io::Result<()> {
    out.write_all(EXAMPLE_CSV.as_bytes())?;
    out.flush()
}
