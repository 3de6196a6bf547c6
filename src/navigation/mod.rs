use crate::errors::AppError;
use crate::reporter::AppReporter;
use crate::AppResult;
use url::Url;

pub trait Navigator {
    fn navigate(&self, url: &Url) -> AppResult<()>;
}

/// Opens the destination in the default system browser.
#[derive(Debug, Clone, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &Url) -> AppResult<()> {
        tracing::info!("Opening {} in the system browser", url);
        webbrowser::open(url.as_str()).map_err(|source| AppError::NavigationError {
            url: url.to_string(),
            source,
        })
    }
}

/// Prints the destination instead of opening it.
#[derive(Debug, Clone)]
pub struct PrintNavigator<'a> {
    reporter: &'a AppReporter<'a>,
}

impl<'a> PrintNavigator<'a> {
    pub fn new(reporter: &'a AppReporter<'a>) -> Self {
        Self { reporter }
    }
}

impl Navigator for PrintNavigator<'_> {
    fn navigate(&self, url: &Url) -> AppResult<()> {
        self.reporter.report(url.as_str())
    }
}

#[derive(Debug, Clone)]
pub enum Navigators<'a> {
    Browser(BrowserNavigator),
    Print(PrintNavigator<'a>),
}

impl<'a> Navigators<'a> {
    pub fn new_navigator(open_browser: bool, reporter: &'a AppReporter<'a>) -> Self {
        if open_browser {
            Navigators::Browser(BrowserNavigator)
        } else {
            Navigators::Print(PrintNavigator::new(reporter))
        }
    }
}

impl Navigator for Navigators<'_> {
    fn navigate(&self, url: &Url) -> AppResult<()> {
        match self {
            Navigators::Browser(navigator) => navigator.navigate(url),
            Navigators::Print(navigator) => navigator.navigate(url),
        }
    }
}
