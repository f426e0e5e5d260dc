use anyhow::Result;
use log::{error, info};
use crate::clock::SystemClock;
use crate::errors::BadgeError;
use crate::initialization::{init, Mgr};
use crate::worker::run;

mod clock;
mod config;
mod display;
mod elapsed;
mod errors;
mod initialization;
mod logging;
mod manager_forecast;
mod manager_mail;
mod template;
pub mod models;
mod worker;

fn main() -> Result<()> {

    // Load config and set up all managers. If initialization fails we can't log or send a
    // notification mail, the error is only printed on stderr.
    let (config, mgr) = match init() {
        Ok((c, m)) => (c, m),
        Err(e) => {
            return Err(BadgeError(format!("Initialization failed: {}", e)))?;
        }
    };

    // Update the badge
    match run(&mgr.forecast, &SystemClock, &mgr.settings, &config.files) {
        Ok(fields) => {
            info!("Badge updated: {} ({}°F)", config.files.output, fields.temp_f);
            if mgr.mail.as_ref().is_some_and(|m| m.report_success()) {
                notify(&mgr, "Report", format!("Successfully updated {}", config.files.output));
            }
        },
        Err(e) => {
            error!("Run failed: {}", e);
            notify(&mgr, "Error in weather badge", format!("Run failed: {}", e));
            return Err(BadgeError(e.to_string()))?;
        }
    }

    Ok(())
}

/// Sends a report mail if mail is configured, failures are only logged
///
/// # Arguments
///
/// * 'mgr' - struct with managers
/// * 'subject' - mail subject
/// * 'body' - mail body
fn notify(mgr: &Mgr, subject: &str, body: String) {
    if let Some(mail) = &mgr.mail {
        if let Err(e) = mail.send_mail(subject.into(), body) {
            error!("Sending report mail failed: {}", e);
        }
    }
}
