pub fn render_index(available: u32) -> String {
    INDEX_HTML.replace("{{AVAILABLE}}", &available.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Stempelpass</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    h1 { margin: 0; font-size: 2rem; }

    .dietzies {
      background: var(--card);
      border-radius: 999px;
      padding: 10px 18px;
      box-shadow: var(--shadow);
      font-weight: 600;
      cursor: pointer;
    }

    .card {
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 22px;
      display: grid;
      gap: 12px;
    }

    .card h2 { margin: 0; font-size: 1.25rem; }

    .meta { color: #6b645d; font-size: 0.95rem; }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.12);
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
      transition: width 200ms ease;
    }

    .row { display: flex; gap: 10px; flex-wrap: wrap; }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.secondary { background: var(--accent-2); }
    button:disabled { opacity: 0.5; cursor: default; }

    input[type="number"] {
      border: 1px solid rgba(47, 72, 88, 0.25);
      border-radius: 999px;
      padding: 10px 14px;
      width: 120px;
      font-size: 0.95rem;
    }

    .status { min-height: 1.2em; color: #6b645d; font-size: 0.95rem; }
    .status[data-type="error"] { color: #c63b2b; }
    .status[data-type="ok"] { color: #2d7a4b; }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Stempelpass</h1>
      <div class="dietzies" id="dietzies" title="Dietzie einlösen">🎁 {{AVAILABLE}}</div>
    </header>
    <div id="cards"></div>
    <div class="status" id="status"></div>
  </main>

  <script>
    const cardsEl = document.getElementById('cards');
    const dietziesEl = document.getElementById('dietzies');
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderCard = (pass) => {
      const card = document.createElement('div');
      card.className = 'card';

      const actions = pass.type === 'simple'
        ? `<button data-act="stamp" data-id="${pass.id}" ${pass.complete ? 'disabled' : ''}>Stempel +</button>
           <button class="secondary" data-act="unstamp" data-id="${pass.id}">Rückgängig</button>`
        : pass.measurementEnabled
          ? `<input type="number" step="0.1" id="value-${pass.id}" placeholder="${pass.unit}" />
             <button data-act="measure" data-id="${pass.id}">Eintragen</button>
             <button class="secondary" data-act="unmeasure" data-id="${pass.id}">Rückgängig</button>`
          : `<span class="meta">Kein Startwert gesetzt</span>`;

      card.innerHTML = `
        <h2>${pass.icon} ${pass.name}</h2>
        <div class="meta">${pass.progressText} · Runde ${pass.completedRounds + 1}</div>
        <div class="bar"><span style="width: ${pass.progress}%"></span></div>
        <div class="row">${actions}
          ${pass.complete ? `<button class="secondary" data-act="reset" data-id="${pass.id}">Neue Runde</button>` : ''}
        </div>`;
      return card;
    };

    const loadPasses = async () => {
      const res = await fetch('/api/passes');
      if (!res.ok) throw new Error('Pässe konnten nicht geladen werden');
      const passes = await res.json();
      cardsEl.replaceChildren(...passes.map(renderCard));
    };

    const loadDietzies = async () => {
      const res = await fetch('/api/dietzies');
      if (!res.ok) return;
      const dietzies = await res.json();
      dietziesEl.textContent = `🎁 ${dietzies.available}`;
    };

    const call = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : undefined,
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) throw new Error(await res.text() || 'Fehler');
      return res.json();
    };

    cardsEl.addEventListener('click', async (event) => {
      const button = event.target.closest('button');
      if (!button) return;
      const { act, id } = button.dataset;
      try {
        if (act === 'stamp') {
          const result = await call('POST', `/api/passes/${id}/stamps`);
          if (result.completed) setStatus('Pass komplett! Dietzie verdient 🎉', 'ok');
        } else if (act === 'unstamp') {
          await call('DELETE', `/api/passes/${id}/stamps`);
        } else if (act === 'measure') {
          const value = parseFloat(document.getElementById(`value-${id}`).value);
          if (Number.isNaN(value)) return;
          const result = await call('POST', `/api/passes/${id}/measurements`, { value });
          if (!result.success) {
            setStatus(result.error, 'error');
          } else if (result.completed) {
            setStatus('Pass komplett! Dietzie verdient 🎉', 'ok');
          }
        } else if (act === 'unmeasure') {
          await call('DELETE', `/api/passes/${id}/measurements`);
        } else if (act === 'reset') {
          await call('POST', `/api/passes/${id}/reset`);
        }
        await Promise.all([loadPasses(), loadDietzies()]);
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    dietziesEl.addEventListener('click', async () => {
      try {
        const result = await call('POST', '/api/dietzies/redeem');
        if (!result.success) {
          setStatus('Keine Dietzies verfügbar', 'error');
        } else {
          setStatus('Dietzie eingelöst!', 'ok');
        }
        await loadDietzies();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    loadPasses().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
