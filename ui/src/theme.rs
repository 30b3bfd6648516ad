pub const GLOBAL_CSS: &str = r#"
:root {
  --bg: #f6f8fb;
  --panel: #ffffff;
  --border: rgba(0, 0, 0, 0.08);
  --border-strong: rgba(0, 0, 0, 0.16);
  --text: #0c1625;
  --text-dim: #5b6678;
  --accent: #2563eb;
  --accent-strong: #1d4ed8;
  --positive: #0ea66c;
  --negative: #e11d48;
  --shadow-soft: 0 10px 30px rgba(0, 0, 0, 0.08);
  --radius: 10px;
  --space-1: 4px;
  --space-2: 8px;
  --space-3: 12px;
  --space-4: 16px;
  --space-6: 24px;
  --font-body: "Inter", "PingFang SC", "Microsoft YaHei", system-ui, sans-serif;
  --font-size-sm: 13px;
  --font-size-md: 15px;
  --transition: 140ms ease-out;
}

* { box-sizing: border-box; }
html, body {
  padding: 0;
  margin: 0;
  background: var(--bg);
  color: var(--text);
  font-family: var(--font-body);
  font-size: var(--font-size-sm);
  line-height: 1.5;
  min-height: 100%;
}

.page {
  max-width: 960px;
  margin: 0 auto;
  padding: var(--space-6) var(--space-4);
  display: flex;
  flex-direction: column;
  gap: var(--space-4);
}

.page-header h1 { margin: 0 0 var(--space-1); font-size: 24px; }
.page-subtitle { margin: 0; color: var(--text-dim); }

.panel {
  background: var(--panel);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  box-shadow: var(--shadow-soft);
  padding: var(--space-4);
  margin-bottom: var(--space-4);
}

.section-label {
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  color: var(--text-dim);
  margin-bottom: var(--space-3);
}

input, select {
  background: #fff;
  border: 1px solid var(--border-strong);
  color: var(--text);
  padding: var(--space-2) var(--space-3);
  border-radius: var(--radius);
  font-size: var(--font-size-sm);
  outline: none;
  transition: border-color var(--transition), box-shadow var(--transition);
}

input:focus, select:focus {
  border-color: var(--accent);
  box-shadow: 0 0 0 1px rgba(37, 99, 235, 0.3);
}

button {
  font-family: var(--font-body);
  border: 1px solid var(--border-strong);
  border-radius: var(--radius);
  background: #fff;
  padding: var(--space-2) var(--space-4);
  cursor: pointer;
  transition: background var(--transition);
}
button:hover { background: rgba(0, 0, 0, 0.04); }
button[type="submit"] {
  background: var(--accent);
  border-color: var(--accent);
  color: #fff;
  font-size: var(--font-size-md);
}
button[type="submit"]:hover { background: var(--accent-strong); }
button[type="submit"]:disabled {
  opacity: 0.6;
  cursor: not-allowed;
}

.factor-grid {
  display: flex;
  flex-wrap: wrap;
  gap: var(--space-3) var(--space-6);
}
.factor-option {
  display: inline-flex;
  align-items: center;
  gap: var(--space-2);
  cursor: pointer;
}

.portfolio-toolbar {
  display: flex;
  align-items: center;
  gap: var(--space-2);
  margin-bottom: var(--space-3);
}

.portfolio-table { width: 100%; border-collapse: collapse; }
.portfolio-table th, .portfolio-table td {
  text-align: left;
  padding: var(--space-2);
  border-bottom: 1px solid var(--border);
}
.portfolio-table input { width: 100%; }
.text-center { text-align: center; }
.delete-stock { color: var(--negative); padding: 2px 10px; }

.portfolio-footer {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin-top: var(--space-3);
}

.text-success { color: var(--positive); }
.text-danger { color: var(--negative); }
.fw-bold { font-weight: 700; }

.submit-row {
  display: flex;
  align-items: center;
  gap: var(--space-4);
}

.loading { align-items: center; gap: var(--space-2); color: var(--text-dim); }
.spinner {
  width: 14px;
  height: 14px;
  border: 2px solid var(--border-strong);
  border-top-color: var(--accent);
  border-radius: 50%;
  display: inline-block;
  animation: spin 0.8s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }

.stats-table { width: 100%; border-collapse: collapse; margin-bottom: var(--space-4); }
.stats-table th, .stats-table td {
  text-align: left;
  padding: var(--space-2);
  border-bottom: 1px solid var(--border);
}

.chart-canvas { width: 100%; height: 320px; display: block; }
.scatter-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
  gap: var(--space-4);
}
.scatter-cell h6 { margin: 0 0 var(--space-2); }
.scatter-canvas { height: 300px; }

.hidden-chart {
  opacity: 0;
  transform: translateY(12px);
  transition: opacity 600ms ease-out, transform 600ms ease-out;
}
.show-chart {
  opacity: 1;
  transform: none;
}
"#;
