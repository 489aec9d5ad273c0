/*
Copyright 2022 Volker Schwaberow <volker@schwaberow.de>
Permission is hereby granted, free of charge, to any person obtaining a
copy of this software and associated documentation files (the
"Software"), to deal in the Software without restriction, including without
limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the
Software is furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be
included in all copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR
OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
DEALINGS IN THE SOFTWARE.
Author(s): Volker Schwaberow
*/

use chrono::{DateTime, Utc};

/// Tally of storefront checks made during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetState {
    total_checks: u64,
    successful_checks: usize,
    failed_checks: usize,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl GetState {
    pub fn new() -> GetState {
        GetState::default()
    }

    pub fn start(&mut self) {
        self.start_time = Some(Utc::now());
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Utc::now());
    }

    pub fn add_success(&mut self) {
        self.total_checks += 1;
        self.successful_checks += 1;
    }

    pub fn add_failure(&mut self) {
        self.total_checks += 1;
        self.failed_checks += 1;
    }

    pub fn total_checks(&self) -> u64 {
        self.total_checks
    }

    pub fn successful_checks(&self) -> usize {
        self.successful_checks
    }

    pub fn failed_checks(&self) -> usize {
        self.failed_checks
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn elapsed_ms(&self) -> i64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (end - start).num_milliseconds(),
            _ => 0,
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} checks. Started at {} / Ended at {}. {} ms. Successful: {}. Failed: {}.",
            self.total_checks,
            format_time(self.start_time),
            format_time(self.end_time),
            self.elapsed_ms(),
            self.successful_checks,
            self.failed_checks
        )
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
