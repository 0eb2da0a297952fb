use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use thirtyfour::prelude::*;
use url::Url;

use crate::config::Credentials;
use crate::driver::PageDriver;
use crate::error::{DriverError, ScrapeError};
use crate::utils::random_user_agent;

const LOGIN_URL: &str = "https://www.linkedin.com/login";

/// How long the login form is given to settle after submission.
const LOGIN_SETTLE: Duration = Duration::from_secs(5);

/// Production driver backed by a chromedriver session via WebDriver.
pub struct WebDriverBackend {
    driver: WebDriver,
}

impl WebDriverBackend {
    /// Connect to a running chromedriver and open a browser session.
    ///
    /// The window size and user agent mirror a plain desktop browser so
    /// the catalog serves its regular markup.
    pub async fn connect(
        webdriver_url: &str,
        page_load_timeout: Duration,
    ) -> Result<Self, DriverError> {
        let mut caps = DesiredCapabilities::chrome();
        let args = [
            "--no-sandbox".to_string(),
            "--disable-setuid-sandbox".to_string(),
            "--window-size=1366,768".to_string(),
            format!("--user-agent={}", random_user_agent()),
        ];
        for arg in &args {
            caps.add_arg(arg)
                .map_err(|e| DriverError::Session(e.to_string()))?;
        }

        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?;

        driver
            .set_page_load_timeout(page_load_timeout)
            .await
            .map_err(|e| DriverError::Session(e.to_string()))?;

        Ok(Self { driver })
    }

    /// Authenticate the session against the catalog's login form.
    ///
    /// A session that is still on the login page after submission counts
    /// as failed authentication.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ScrapeError> {
        log::info!("logging in to {}", LOGIN_URL);

        self.driver
            .goto(LOGIN_URL)
            .await
            .map_err(|e| ScrapeError::Auth(format!("login page unreachable: {e}")))?;

        let username = self
            .driver
            .find(By::Id("username"))
            .await
            .map_err(|e| ScrapeError::Auth(format!("username field not found: {e}")))?;
        username
            .send_keys(&credentials.email)
            .await
            .map_err(|e| ScrapeError::Auth(e.to_string()))?;

        let password = self
            .driver
            .find(By::Id("password"))
            .await
            .map_err(|e| ScrapeError::Auth(format!("password field not found: {e}")))?;
        password
            .send_keys(&credentials.password)
            .await
            .map_err(|e| ScrapeError::Auth(e.to_string()))?;

        self.driver
            .find(By::Css("button[type='submit']"))
            .await
            .map_err(|e| ScrapeError::Auth(format!("submit button not found: {e}")))?
            .click()
            .await
            .map_err(|e| ScrapeError::Auth(e.to_string()))?;

        tokio::time::sleep(LOGIN_SETTLE).await;

        let current = self
            .driver
            .current_url()
            .await
            .map_err(|e| ScrapeError::Auth(e.to_string()))?;
        if current.path().contains("login") {
            return Err(ScrapeError::Auth(
                "still on the login page; check credentials".to_string(),
            ));
        }

        log::info!("login successful");
        Ok(())
    }

    /// Close the browser session.
    pub async fn quit(self) -> Result<(), DriverError> {
        self.driver
            .quit()
            .await
            .map_err(|e| DriverError::Session(e.to_string()))
    }
}

#[async_trait]
impl PageDriver for WebDriverBackend {
    async fn navigate(&self, url: &Url) -> Result<(), DriverError> {
        self.driver
            .goto(url.as_str())
            .await
            .map_err(|e| DriverError::Navigation(e.to_string()))
    }

    async fn page_source(&self) -> Result<String, DriverError> {
        self.driver
            .source()
            .await
            .map_err(|e| DriverError::Session(e.to_string()))
    }

    async fn scroll_by(&self, pixels: u32) -> Result<(), DriverError> {
        self.driver
            .execute("window.scrollBy(0, arguments[0]);", vec![json!(pixels)])
            .await
            .map_err(|e| DriverError::Script(e.to_string()))?;
        Ok(())
    }

    async fn scroll_extent(&self) -> Result<u64, DriverError> {
        let ret = self
            .driver
            .execute("return document.body.scrollHeight;", Vec::new())
            .await
            .map_err(|e| DriverError::Script(e.to_string()))?;
        ret.convert()
            .map_err(|e| DriverError::Script(format!("scroll extent not a number: {e}")))
    }
}
