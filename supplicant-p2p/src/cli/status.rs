//! Status command for showing the configured interfaces and networks

use std::path::{Path, PathBuf};

use supplicant_p2p::{IfaceType, SupplicantConfig};

/// Show daemon state and the contents of the configuration file
pub async fn show_status(home: PathBuf) -> eyre::Result<()> {
    println!("supplicant-p2p status");
    println!("home: {}", home.display());
    println!("daemon: {}", daemon_status(&home));
    println!();

    let config = SupplicantConfig::load_from_dir(&home).await?;
    print!("{}", render_config(&config));
    Ok(())
}

fn daemon_status(home: &Path) -> &'static str {
    if home.join(supplicant_p2p_client::CONTROL_SOCKET).exists() {
        "running (control socket present)"
    } else {
        "not running"
    }
}

fn render_config(config: &SupplicantConfig) -> String {
    if config.interfaces.is_empty() {
        return format!(
            "no interfaces configured (add them to {})\n",
            SupplicantConfig::FILE_NAME
        );
    }

    let mut out = String::new();
    for iface in &config.interfaces {
        let kind = match iface.iface_type {
            IfaceType::P2p => "p2p",
            IfaceType::Sta => "sta",
        };
        out.push_str(&format!(
            "{} ({kind}): {} network(s)\n",
            iface.name,
            iface.networks.len()
        ));

        for (id, network) in iface.networks.iter().enumerate() {
            let current = if iface.current_network == Some(id as u32) { " *" } else { "" };
            out.push_str(&format!(
                "  [{id}] {}{}{}{current}\n",
                String::from_utf8_lossy(&network.ssid),
                if network.is_go() { " GO" } else { "" },
                if network.persistent { " persistent" } else { "" },
            ));
        }
    }
    out
}
