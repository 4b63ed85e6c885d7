// Usage page served at the service root

pub const HELP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Redirect Service - Usage</title>
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; max-width: 42rem; margin: 0 auto; padding: 3rem 1.5rem; background: #f9fafb; color: #111827; line-height: 1.6; }
    code { background: #fff; padding: 0.15rem 0.4rem; border-radius: 0.25rem; }
    .box { border-left: 4px solid #3b82f6; padding: 1rem; margin: 1.5rem 0; background: #f3f4f6; }
    .box.defaults { border-color: #22c55e; }
    .box.note { border-color: #eab308; background: #fefce8; }
    .to { color: #4b5563; font-size: 0.85rem; display: block; margin-bottom: 0.5rem; }
  </style>
</head>
<body>
  <h1>Redirect Service</h1>
  <p>This service performs HTTP 302 redirects using path parameters. Use the path to specify your target URL.</p>

  <h2>Usage</h2>
  <div class="box">
    <strong>Explicit scheme</strong><br>
    <code>/http/localhost:5173/callback</code><span class="to">&rarr; http://localhost:5173/callback</span>
    <code>/https/postonus.com/callback</code><span class="to">&rarr; https://postonus.com/callback</span>
  </div>
  <div class="box defaults">
    <strong>Smart defaults</strong><br>
    <code>/localhost:5173/callback</code><span class="to">&rarr; http://localhost:5173/callback (defaults to http)</span>
    <code>/postonus.com/callback</code><span class="to">&rarr; https://postonus.com/callback (defaults to https)</span>
    <code>/127.0.0.1:3000/auth</code><span class="to">&rarr; http://127.0.0.1:3000/auth (localhost detected)</span>
  </div>
  <div class="box note">
    <strong>Note:</strong> if a URL already includes a scheme (http:// or https://), defaults are ignored and the URL is used as-is.
  </div>

  <h2>Query parameters and fragments</h2>
  <p>Query parameters on the request are forwarded to the target, overriding parameters of the same name.
  Pass <code>?hash=value</code> (or <code>?_hash=value</code>) to set the target's <code>#fragment</code>.</p>

  <h2>Features</h2>
  <ul>
    <li>Supports localhost and custom ports (OAuth local development)</li>
    <li>http for localhost, https for everything else</li>
    <li>Explicit scheme override</li>
    <li>Only http and https targets; invalid URLs return 400</li>
    <li>CORS headers on every response</li>
  </ul>
</body>
</html>
"#;
