use crate::chart::format_calories;

pub fn render_index(date: &str, total: f64) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{TOTAL}}", &format_calories(total))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calorie Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    body.scroll-locked {
      overflow: hidden;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .nav {
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .nav input {
      font: inherit;
      padding: 8px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button.remove {
      background: transparent;
      color: var(--accent);
      padding: 6px 10px;
    }

    .groups {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .group {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .group h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .row {
      display: flex;
      gap: 6px;
    }

    .row input {
      width: 100%;
      font: inherit;
      padding: 6px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .subtotal {
      color: #8b857d;
      font-size: 0.85rem;
    }

    .total {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent);
    }

    .chart-card {
      background: white;
      border-radius: 18px;
      padding: 12px;
    }

    .chart-card svg {
      display: block;
      width: 100%;
      height: auto;
    }

    .chart-bar {
      fill: var(--accent-2);
    }

    .chart-axis {
      stroke: #cfc8bd;
    }

    .chart-ideal {
      stroke: var(--accent);
      stroke-dasharray: 6 4;
      stroke-width: 2;
    }

    .chart-value, .chart-label, .chart-ideal-label {
      font-size: 12px;
      fill: #6b645d;
    }

    .drawer {
      position: fixed;
      inset: 0;
      background: var(--bg-1);
      padding: 36px;
      display: none;
      flex-direction: column;
      gap: 18px;
    }

    .drawer.open {
      display: flex;
    }

    .drawer input {
      font: inherit;
      padding: 10px 14px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .status {
      min-height: 24px;
      font-weight: 500;
    }

    .status[data-type="error"] {
      color: #b3261e;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Calorie Tracker</h1>
      <div class="nav">
        <button id="prev" type="button">&larr;</button>
        <input id="date" type="date" value="{{DATE}}" />
        <button id="next" type="button">&rarr;</button>
      </div>
    </header>

    <section id="groups" class="groups"></section>

    <p>Total: <span id="total" class="total">{{TOTAL}}</span></p>

    <section class="chart-card" id="chart"></section>

    <div class="status" id="status"></div>
    <p class="subtotal">Swipe sideways to open settings.</p>
  </main>

  <aside class="drawer" id="drawer">
    <h2>Settings</h2>
    <label for="ideal">Ideal calories</label>
    <input id="ideal" type="number" />
    <button id="close-drawer" type="button">Close</button>
  </aside>

  <script>
    const groupsEl = document.getElementById('groups');
    const totalEl = document.getElementById('total');
    const dateEl = document.getElementById('date');
    const chartEl = document.getElementById('chart');
    const statusEl = document.getElementById('status');
    const drawerEl = document.getElementById('drawer');
    const idealEl = document.getElementById('ideal');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const call = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res;
    };

    // Writes go out one at a time in the order they were made. Consecutive
    // writes to the same field collapse into the newest one still waiting.
    let queue = Promise.resolve();
    let tail = null;
    const enqueue = (key, send) => {
      if (key && tail && tail.key === key) {
        tail.send = send;
        return queue;
      }
      const slot = { key, send };
      tail = slot;
      queue = queue.then(() => {
        if (tail === slot) {
          tail = null;
        }
        return slot.send();
      });
      return queue;
    };

    const loadChart = async () => {
      const width = Math.round(chartEl.clientWidth) || 600;
      const res = await call('GET', `/api/chart?width=${width}`);
      chartEl.innerHTML = await res.text();
    };

    const updateTotals = (day) => {
      totalEl.textContent = day.total;
      groupsEl.querySelectorAll('.subtotal').forEach((el, index) => {
        el.textContent = day.group_totals[index];
      });
    };

    const renderDay = (day) => {
      dateEl.value = day.date;
      groupsEl.innerHTML = '';
      day.groups.forEach((group, groupIndex) => {
        const card = document.createElement('div');
        card.className = 'group';
        const title = document.createElement('h2');
        title.textContent = group.name;
        card.appendChild(title);

        group.numbers.forEach((value, entryIndex) => {
          const row = document.createElement('div');
          row.className = 'row';
          const input = document.createElement('input');
          input.type = 'number';
          input.value = value;
          input.addEventListener('input', () => {
            const body = { group: groupIndex, entry: entryIndex, value: input.value };
            edit('POST', '/api/entries', body, false, `entry:${groupIndex}:${entryIndex}`);
          });
          const remove = document.createElement('button');
          remove.className = 'remove';
          remove.type = 'button';
          remove.textContent = '×';
          remove.addEventListener('click', () => {
            edit('POST', '/api/entries/remove', { group: groupIndex, entry: entryIndex }, true);
          });
          row.append(input, remove);
          card.appendChild(row);
        });

        const add = document.createElement('button');
        add.type = 'button';
        add.textContent = '+';
        add.addEventListener('click', () => edit('POST', '/api/entries/add', { group: groupIndex }, true));
        const subtotal = document.createElement('span');
        subtotal.className = 'subtotal';
        card.append(add, subtotal);
        groupsEl.appendChild(card);
      });
      updateTotals(day);
    };

    const edit = (method, url, body, rerender, key) =>
      enqueue(key, () => apply(method, url, body, rerender));

    const apply = async (method, url, body, rerender) => {
      try {
        const res = await call(method, url, body);
        const day = await res.json();
        if (rerender) {
          renderDay(day);
        } else {
          updateTotals(day);
        }
        await loadChart();
        setStatus('', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const applyDrawer = (drawer) => {
      drawerEl.classList.toggle('open', drawer.open);
      document.body.classList.toggle('scroll-locked', drawer.scroll_locked);
    };

    const loadSettings = async () => {
      const res = await call('GET', '/api/settings');
      const settings = await res.json();
      idealEl.value = settings.ideal_calories;
    };

    document.getElementById('prev').addEventListener('click', () => edit('POST', '/api/day/previous', null, true));
    document.getElementById('next').addEventListener('click', () => edit('POST', '/api/day/next', null, true));
    dateEl.addEventListener('change', () => {
      if (dateEl.value) {
        edit('POST', '/api/day/goto', { date: dateEl.value }, true);
      }
    });

    idealEl.addEventListener('input', () => {
      const body = { ideal_calories: idealEl.value };
      enqueue('ideal', async () => {
        try {
          await call('PUT', '/api/settings', body);
          await loadChart();
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
    });

    let touchStartX = null;
    let touchLastX = null;
    document.addEventListener('touchstart', (event) => {
      touchStartX = event.touches[0].clientX;
      touchLastX = null;
    });
    document.addEventListener('touchmove', (event) => {
      touchLastX = event.touches[0].clientX;
    });
    document.addEventListener('touchend', async () => {
      if (touchStartX === null || touchLastX === null || drawerEl.classList.contains('open')) {
        touchStartX = null;
        return;
      }
      const gesture = { start_x: touchStartX, end_x: touchLastX };
      touchStartX = null;
      try {
        const res = await call('POST', '/api/drawer/swipe', gesture);
        applyDrawer(await res.json());
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('close-drawer').addEventListener('click', async () => {
      try {
        const res = await call('POST', '/api/drawer/close');
        applyDrawer(await res.json());
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    window.addEventListener('pagehide', () => {
      navigator.sendBeacon('/api/drawer/close');
    });

    new ResizeObserver(() => {
      loadChart().catch((err) => setStatus(err.message, 'error'));
    }).observe(chartEl);

    const init = async () => {
      const [dayRes, drawerRes] = await Promise.all([call('GET', '/api/day'), call('GET', '/api/drawer')]);
      renderDay(await dayRes.json());
      applyDrawer(await drawerRes.json());
      await Promise.all([loadSettings(), loadChart()]);
    };

    init().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_fills_date_and_total() {
        let html = render_index("2026-01-05", 1234.0);
        assert!(html.contains(r#"value="2026-01-05""#));
        assert!(html.contains(">1234<"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn field_writes_share_one_ordered_queue() {
        let html = render_index("2026-01-05", 0.0);
        assert!(html.contains("queue = queue.then("));
        assert!(html.contains("`entry:${groupIndex}:${entryIndex}`"));
        assert!(html.contains("enqueue('ideal',"));
        assert!(html.contains("enqueue(key, () => apply("));
    }
}
