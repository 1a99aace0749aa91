//! Shared fixtures for pipeline integration tests.

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};

use mailforge_core::Config;

/// Config with injected instants so runs are reproducible byte-for-byte.
pub fn fixed_config() -> Config {
    Config {
        base_date: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        source_epoch: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        date_fallback: Utc.with_ymd_and_hms(2001, 6, 1, 0, 0, 0).unwrap(),
        ..Config::default()
    }
}

pub fn write_source_file(dir: &Path, name: &str, text: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), text).unwrap();
}

/// Three-record scenario for owner `doe-j` (fragment `doe`):
/// 1. sent by the owner to anna and ben, subject "Budget";
/// 2. reply-all from anna, subject "Re: Budget", same thread as 1;
/// 3. from carol, subject "Meeting notes", its own thread.
pub fn budget_fixture(source_root: &Path) {
    let owner = source_root.join("doe-j");

    write_source_file(
        &owner.join("sent_items"),
        "1.",
        "Message-ID: <budget-1@source>\n\
Date: Mon, 5 Mar 2001 09:15:00 -0800 (PST)\n\
From: jdoe@enron.com\n\
To: anna@corp.com, ben@corp.com\n\
Subject: Budget\n\
X-Folder: \\John_Doe\\Sent Items\n\
\n\
Draft numbers attached. Enron review is Friday.\n",
    );

    write_source_file(
        &owner.join("inbox"),
        "1.",
        "Message-ID: <budget-2@source>\n\
Date: Tue, 6 Mar 2001 10:30:00 -0800 (PST)\n\
From: anna@corp.com\n\
To: jdoe@enron.com, ben@corp.com\n\
Subject: Re: Budget\n\
X-Folder: \\John_Doe\\Inbox\n\
\n\
Looks good. Reach me at anna@corp.com or ping jdoe@enron.com.\n\
ENRON should sign off this week.\n",
    );

    write_source_file(
        &owner.join("inbox"),
        "2.",
        "Message-ID: <meeting-1@source>\n\
Date: Wed, 7 Mar 2001 08:00:00 -0800 (PST)\n\
From: carol@other.org\n\
To: jdoe@enron.com\n\
Subject: Meeting notes\n\
X-Folder: \\John_Doe\\Inbox\n\
\n\
Notes from yesterday follow.\n",
    );
}
