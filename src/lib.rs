pub mod modules {
    pub mod run_entries {
        pub mod core {
            pub mod duration;
            pub mod entry;
            pub mod ports;
            pub mod report;
        }
        pub mod use_cases {
            pub mod manage_entries {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod download_report {
                pub mod handler;
                pub mod renderer_port;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod entry_store_in_memory;
                pub mod entry_store_sqlite;
                pub mod pdf_report;
            }
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod tests {
    pub mod fixtures {
        pub mod entries;
    }

    pub mod e2e {
        pub mod report_flow_tests;
    }
}
