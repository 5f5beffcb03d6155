use std::net::IpAddr;

use reachr_common::report::GuideContext;

use crate::terminal::print;

pub fn guide(ctx: &GuideContext, q_level: u8) {
    if q_level > 1 {
        return;
    }
    print::header("external access setup guide", q_level);
    print::block(&render(ctx));
}

/// The setup guide with every known value filled in.
pub fn render(ctx: &GuideContext) -> String {
    let internal = ctx
        .lan_address
        .map_or_else(|| "[internal-ip]".to_string(), |ip| ip.to_string());
    let external = ctx
        .external_ip
        .map_or_else(|| "[external-ip]".to_string(), |ip| match ip {
            IpAddr::V6(v6) => format!("[{v6}]"),
            IpAddr::V4(v4) => v4.to_string(),
        });
    let api = ctx.api_port;
    let ws = ctx.ws_port;
    let ws_http = ctx.ws_http_port;

    format!(
        r#"
Steps to make the stack reachable from outside:

1. Port forwarding (router)
   - Port {api} -> {internal}:{api} (API server)
   - Port {ws_http} -> {internal}:{ws_http} (WebSocket HTTP API)

2. Firewall
   - Allow inbound TCP on ports {api} and {ws_http}
   - Windows: netsh advfirewall firewall add rule name="reachr API" dir=in action=allow protocol=TCP localport={api}
   - Linux:   sudo ufw allow {api}/tcp && sudo ufw allow {ws_http}/tcp

3. Start the servers
   - API server: ./gradlew bootRun
   - WebSocket server: cargo run

4. Test from outside
   - http://{external}:{api}/api/test/health
   - ws://{external}:{ws} (WebSocket)

5. Production hardening
   - Serve over HTTPS/WSS
   - Verify JWT tokens
   - Configure rate limiting
   - Apply a CORS policy
"#
    )
}
