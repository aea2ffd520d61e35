//! Static copy for the prediction page. Entries are trusted HTML fragments.

pub const PAGE_TITLE: &str = "Red Wine Quality Classifier";
pub const FAVICON_URL: &str = "https://account.citibikenyc.com/favicon.ico";
pub const HELP_MAILTO: &str = "mailto:salimkilinc@yahoo.com";
pub const ABOUT_URL: &str = "https://github.com/salimkilinc";

pub const INTRO: &str = "An upscale restaurant wants to decide whether the quality of a red wine \
is <strong class=\"accent\">Low</strong> or <strong class=\"accent\">High</strong> based on some \
wine data from a database.";

pub const HERO_IMAGE: &str =
    "https://w0.peakpx.com/wallpaper/577/271/HD-wallpaper-red-wine-glass-of-wine-bottle-of-wine-grapes.jpg";

pub const MISSION: [&str; 3] = [
    "Following recent advancements in the artificial intelligence sector, they anticipate us to \
create a <strong>machine learning model</strong> that aligns with their requirements and supports \
their research endeavors.",
    "They also want us to develop a product that, after receiving information about a new type of \
red wine, can predict whether the quality of this red wine is low or high using the information \
provided.",
    "<em>Let's lend our assistance to them!</em>",
];

pub const CELLAR_IMAGE: &str = "https://assets.architecturaldigest.in/photos/6008342bb3d78db39997cec9/16:9/w_2240,c_limit/Let-Awakening-inspire-your-wine-selection-1366x768.jpg";

/// Column glossary shown above the sample table.
pub const GLOSSARY: [(&str, &str); 12] = [
    ("quality", "whether a red wine's quality is low or high (0 = low, 1 = high)"),
    ("fixed_acidity", "most acids involved with wine or fixed or nonvolatile (do not evaporate readily)"),
    ("volatile_acidity", "the amount of acetic acid in wine, which at too high of levels can lead to an unpleasant, vinegar taste"),
    ("citric_acid", "found in small quantities, citric acid can add 'freshness' and flavor to wines"),
    ("residual_sugar", "the amount of sugar remaining after fermentation stops, it's rare to find wines with less than 1 gram/liter"),
    ("chlorides", "the amount of salt in the wine"),
    ("free_sulfur_dioxide", "the free form of SO2 exists in equilibrium between molecular SO2 (as a dissolved gas) and bisulfite ion"),
    ("total_sulfur_dioxide", "amount of free and bound forms of S02; in low concentrations"),
    ("density", "the density of water is close to that of water depending on the percent alcohol and sugar content"),
    ("ph", "describes how acidic or basic a wine is on a scale from 0 (very acidic) to 14 (very basic)"),
    ("sulphates", "a wine additive which can contribute to sulfur dioxide gas (S02) levels"),
    ("alcohol", "alcohol content of wine by volume"),
];

pub const SIDEBAR_PROMPT: &str =
    "<strong>Select</strong> the features from the options below to view the outcome!";
pub const OUTCOME_HEADER: &str = "Outcome";
pub const OUTCOME_INFO: &str = "The outcome is located beneath.";
pub const SUBMIT_PROMPT: &str = "Please click on <strong>Submit</strong> button!";

pub const STYLE: &str = "\
body{margin:0;font-family:sans-serif;display:flex;color:#262730}\
aside{width:300px;min-height:100vh;padding:1.5rem;background:#f0f2f6;box-sizing:border-box}\
aside label{display:block;margin-top:.8rem;font-size:.9rem}\
aside input{width:100%;padding:.3rem;box-sizing:border-box}\
aside button{margin-top:1.2rem;padding:.5rem 1.2rem}\
main{flex:1;padding:2rem 3rem;max-width:960px}\
main img{max-width:100%}\
table{border-collapse:collapse;margin:1rem 0;font-size:.85rem}\
th,td{border:1px solid #ddd;padding:.3rem .5rem;text-align:right}\
.accent{color:#ff2b2b}.info{background:#e7f0fb;padding:.8rem;border-radius:4px}\
.error{background:#fde8e8;padding:.8rem;border-radius:4px;white-space:pre-wrap}\
footer{margin-top:2rem;font-size:.8rem}";
