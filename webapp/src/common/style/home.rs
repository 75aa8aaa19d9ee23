pub const HOME_STYLES: &str = r#"
/* Site chrome and page styles */

.app-header {
  background-color: var(--surface);
  border-bottom: 1px solid var(--border);
  box-shadow: var(--shadow-sm);
  position: sticky;
  top: 0;
  z-index: 10;
}

.nav-container {
  display: flex;
  height: 64px;
  max-width: var(--container);
  margin: 0 auto;
  align-items: center;
  justify-content: space-between;
  padding: 0 var(--space-5);
}

.logo {
  font-family: var(--font-display);
  font-size: var(--text-xl);
  color: var(--brand);
}

.nav-links {
  display: flex;
  align-items: center;
  gap: var(--space-4);
}

.nav-link {
  color: var(--on-surface);
  font-weight: 500;
  padding: var(--space-2) var(--space-3);
  border-radius: var(--r-md);
}

.nav-link.active {
  color: var(--brand);
  background-color: var(--muted);
}

/* Hero */
.hero {
  background: linear-gradient(160deg, var(--brand), var(--brand-alt));
  color: var(--on-brand);
}

.hero-actions {
  display: flex;
  gap: var(--space-4);
  justify-content: center;
  margin-top: var(--space-7);
  flex-wrap: wrap;
}

/* Spaces */
.spaces-grid,
.demo-grid {
  display: grid;
  gap: var(--space-6);
  grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
}

.demo-row {
  display: flex;
  flex-wrap: wrap;
  gap: var(--space-4);
  margin-bottom: var(--space-4);
}

/* Tour form */
.tour-form {
  display: grid;
  gap: var(--space-4);
  max-width: 480px;
  margin: 0 auto;
}

.tour-form label {
  display: grid;
  gap: var(--space-1);
  font-size: var(--text-sm);
  font-weight: 600;
}

/* Token probe */
.probe-table {
  width: 100%;
  border-collapse: collapse;
  font-size: var(--text-sm);
}

.probe-table td {
  padding: var(--space-2) var(--space-3);
  border-bottom: 1px solid var(--border);
}

.probe-swatch {
  width: 48px;
  height: 24px;
  border-radius: var(--r-sm);
  border: 1px solid var(--border);
}

.site-footer {
  padding: var(--space-7) var(--space-5);
  text-align: center;
  font-size: var(--text-sm);
  background-color: var(--muted);
  color: var(--on-muted);
}
"#;
